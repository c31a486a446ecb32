//! Bus controller implementations

pub mod bitbang;

pub use bitbang::BitBangBus;
