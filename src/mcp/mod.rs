/// MCP protocol front end
///
/// Line-delimited JSON-RPC over stdin/stdout. Each `tools/call` request is
/// mapped onto a presentation-layer tool and from there onto a session
/// command.

pub mod protocol;
pub mod server;

pub use server::McpServer;
