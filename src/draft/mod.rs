// Draft domain: rosters, the assignment engine, and the draft archive.

pub mod engine;
pub mod history;
pub mod roster;
