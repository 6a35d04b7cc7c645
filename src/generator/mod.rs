//! Crawler-facing files for the built site.
//!
//! - **Sitemap**: Search engine indexing (`sitemap.xml`), always rewritten
//! - **Robots**: Crawler rules (`robots.txt`), written only when missing
//!
//! Both are rendered from the resolved route list and site URL, staged in
//! a scratch directory and then moved into the output directory.

pub mod robots;
pub mod sitemap;
pub mod staging;
