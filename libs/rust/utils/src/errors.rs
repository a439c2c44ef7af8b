//config
pub const CONFIG_ALREADY_INITIALIZED: &str = "Linker config already initialized";
pub const CONFIG_NOT_INITIALIZED: &str = "Linker config not initialized";

//input
pub const DOCUMENT_READ_FAILED: &str = "Failed to read document";
pub const SELECTION_READ_FAILED: &str = "Failed to read sentence selection";

//service
pub const CLIENT_BUILD_FAILED: &str = "Failed to build summariser client";
