//! FIT message → GPX element mappings

pub mod record;
