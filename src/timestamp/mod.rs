//! Capture-time handling for sweep identifiers of the form `<product>.<kind>.<YYYYMMDDHHmm>.png`.

pub mod codec;
