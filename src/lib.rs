//! A decoder for the ZSoft PCX raster image format.
//!
//! This crate targets the most common PCX flavor: 8 bits per pixel, a single
//! bit plane, run-length encoded pixel data, and a 256-entry VGA palette
//! stored in the last 768 bytes of the file. The decoder turns such a file
//! into an [`image::RgbImage`].
//!
//! ```no_run
//! use pcx::decoding::decode_image;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("textures/floor.pcx").unwrap();
//! let image = decode_image(BufReader::new(file)).unwrap();
//! image.save("floor.png").unwrap();
//! ```

pub mod decoding;
