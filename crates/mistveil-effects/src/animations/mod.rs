pub mod label;
pub mod loading;
pub mod mist;
pub mod snow;
