//! Locator implementations

pub mod gopath;
