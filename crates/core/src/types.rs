/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Position of a generation item within a run. Index position is the
/// durable identity correlating an item to its originating prompt.
pub type ItemIndex = usize;

/// An image payload carried as a base64 `data:` URI.
pub type ImageData = String;
