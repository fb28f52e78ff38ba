pub mod compress;
pub mod images;
pub mod info;
pub mod merge;
pub mod split;
