//! Console engine: line parsing, command registry, dispatch, help, and
//! redisplay of the prompt around asynchronous output.

pub mod builtins;
pub mod dispatch;
pub mod help;
pub mod line;
pub mod prompt;
pub mod redisplay;
pub mod registry;
pub mod session;
pub mod terminal;

pub use dispatch::{Dispatch, Dispatcher, ExitFlag};
pub use help::HelpRenderer;
pub use line::{expand_target, parse, ParsedCommand};
pub use prompt::{render_prompt, RoutingContext};
pub use redisplay::{RedisplayCoordinator, RefreshHandle, TerminalRepainter};
pub use registry::{CommandEntry, CommandRegistry, GroupId};
pub use session::{Console, ConsoleParts};
pub use terminal::{CaptureBuffer, Terminal};
