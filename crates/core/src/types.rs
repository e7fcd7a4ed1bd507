/// Document ids are opaque strings assigned by the document store.
pub type DocId = String;

/// User ids are document ids in the `users` collection.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
