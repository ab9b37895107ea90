pub mod init;
pub mod songs;

/// Result type shared by command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
