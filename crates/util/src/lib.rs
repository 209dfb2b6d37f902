#[cfg(feature = "testing")]
pub mod test;
