mod assembly;
pub use assembly::{assemble, timestamp_heights};

mod decode;
pub use decode::decode_logs;

mod record;
pub use record::{EventKind, EventRecord, LogKind, IERC20};
