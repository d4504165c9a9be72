//! Wire codec for records crossing machine boundaries.
//!
//! Everything is JSON: one self-contained document per emission or vertex.
//! Vertex streams are newline-delimited.
//!
//! ```text
//! map ──encode_emission──▶ bytes ──shuffle──▶ decode_emission ──▶ reduce
//! ```

use std::io::{BufRead, Write};

use bytes::Bytes;

use crate::model::Vertex;
use crate::step::{Emission, Holder};
use crate::{Error, Result};

pub fn encode_emission(emission: &Emission) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(emission)?))
}

/// Decode an emission; a carried vertex must be well formed.
pub fn decode_emission(bytes: &[u8]) -> Result<Emission> {
    let emission: Emission = serde_json::from_slice(bytes)?;
    if let Holder::ElementUpdate(vertex) = &emission.holder {
        vertex.validate()?;
    }
    Ok(emission)
}

pub fn encode_vertex(vertex: &Vertex) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(vertex)?))
}

pub fn decode_vertex(bytes: &[u8]) -> Result<Vertex> {
    let vertex: Vertex = serde_json::from_slice(bytes)?;
    vertex.validate()?;
    Ok(vertex)
}

/// Read a newline-delimited vertex stream. Blank lines are skipped.
pub fn read_vertices<R: BufRead>(reader: R) -> Result<Vec<Vertex>> {
    let mut vertices = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let vertex = decode_vertex(line.as_bytes()).map_err(|e| match e {
            Error::Codec(inner) => Error::MalformedInput(format!("line {}: {inner}", n + 1)),
            Error::MalformedInput(msg) => Error::MalformedInput(format!("line {}: {msg}", n + 1)),
            other => other,
        })?;
        vertices.push(vertex);
    }
    Ok(vertices)
}

/// Write vertices as a newline-delimited stream.
pub fn write_vertices<'a, W: Write>(
    writer: &mut W,
    vertices: impl IntoIterator<Item = &'a Vertex>,
) -> Result<()> {
    for vertex in vertices {
        serde_json::to_writer(&mut *writer, vertex)?;
        writeln!(writer)?;
    }
    Ok(())
}
