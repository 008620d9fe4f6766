//! Multi-resolution ICO container
//!
//! Frames are stored as embedded PNG streams (the Vista-style layout), which
//! lets a single file carry frames larger than 256px. Directory width/height
//! bytes use 0 for anything 256px and up; the real size lives in the PNG header.

use thiserror::Error;

const ICONDIR_SIZE: usize = 6;
const ICONDIRENTRY_SIZE: usize = 16;
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IcoError {
    #[error("an icon needs at least one frame")]
    Empty,
    #[error("too many frames ({0}); the container holds at most 65535")]
    TooManyFrames(usize),
    #[error("frame {index} is not a PNG stream")]
    NotPng { index: usize },
    #[error("icon data is truncated")]
    Truncated,
    #[error("not an icon file (type {0})")]
    WrongType(u16),
}

/// Dimensions of one frame as decoded from an icon file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoFrameInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub byte_len: u32,
}

/// Read width and height out of a PNG's IHDR chunk
pub fn png_dimensions(png: &[u8]) -> Option<(u32, u32)> {
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4)
    if png.len() < 24 || png[..8] != PNG_SIGNATURE || &png[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(png[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(png[20..24].try_into().ok()?);
    Some((width, height))
}

/// Pack PNG-encoded frames, in the given order, into ICO bytes
pub fn write_ico(frames: &[Vec<u8>]) -> Result<Vec<u8>, IcoError> {
    if frames.is_empty() {
        return Err(IcoError::Empty);
    }
    let count = u16::try_from(frames.len()).map_err(|_| IcoError::TooManyFrames(frames.len()))?;

    let mut dims = Vec::with_capacity(frames.len());
    for (index, frame) in frames.iter().enumerate() {
        dims.push(png_dimensions(frame).ok_or(IcoError::NotPng { index })?);
    }

    let payload: usize = frames.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(ICONDIR_SIZE + ICONDIRENTRY_SIZE * frames.len() + payload);

    // ICONDIR
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // type = ICO
    out.extend_from_slice(&count.to_le_bytes());

    let mut offset = (ICONDIR_SIZE + ICONDIRENTRY_SIZE * frames.len()) as u32;
    for (frame, &(width, height)) in frames.iter().zip(&dims) {
        out.push(dimension_byte(width));
        out.push(dimension_byte(height));
        out.push(0); // palette
        out.push(0); // reserved
        out.extend_from_slice(&1u16.to_le_bytes()); // color planes
        out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
        out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        offset += frame.len() as u32;
    }

    for frame in frames {
        out.extend_from_slice(frame);
    }

    Ok(out)
}

fn dimension_byte(size: u32) -> u8 {
    if size >= 256 {
        0
    } else {
        size as u8
    }
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, IcoError> {
    data.get(at..at + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or(IcoError::Truncated)
}

fn read_u32(data: &[u8], at: usize) -> Result<u32, IcoError> {
    data.get(at..at + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(IcoError::Truncated)
}

/// List the frames of an icon file in directory order
pub fn read_ico_frames(data: &[u8]) -> Result<Vec<IcoFrameInfo>, IcoError> {
    let kind = read_u16(data, 2)?;
    if kind != 1 {
        return Err(IcoError::WrongType(kind));
    }
    let count = read_u16(data, 4)? as usize;

    let mut frames = Vec::with_capacity(count);
    for index in 0..count {
        let entry = ICONDIR_SIZE + index * ICONDIRENTRY_SIZE;
        let dir_width = *data.get(entry).ok_or(IcoError::Truncated)?;
        let dir_height = *data.get(entry + 1).ok_or(IcoError::Truncated)?;
        let bits_per_pixel = read_u16(data, entry + 6)?;
        let byte_len = read_u32(data, entry + 8)?;
        let offset = read_u32(data, entry + 12)? as usize;

        let body = data
            .get(offset..offset + byte_len as usize)
            .ok_or(IcoError::Truncated)?;

        let (width, height) = match png_dimensions(body) {
            Some(dims) => dims,
            // BMP frames: trust the directory, 0 meaning 256
            None => (
                if dir_width == 0 { 256 } else { dir_width as u32 },
                if dir_height == 0 { 256 } else { dir_height as u32 },
            ),
        };

        frames.push(IcoFrameInfo {
            width,
            height,
            bits_per_pixel,
            byte_len,
        });
    }

    Ok(frames)
}
