//! Compiles MAVLink dialect XML definitions into an in-memory codec table.
//!
//! This crate is the *compiler*, not the *framer*: it turns `<mavlink>` XML trees into a
//! [`MergedDialect`] — enum tables, per-message field layout, CRC seed bytes, and encode/decode
//! routines — that a packet-framing layer built on top can use to serialize and deserialize
//! MAVLink payloads. It never reads a file, opens a socket, or touches packet sequence numbers;
//! those are a boundary adapter's job (see [`loader::XmlSource`] for where that boundary sits).
//!
//! # Features
//!
//! * `serde` — add [Serde](https://serde.rs) support to every entity in [`protocol`].
//!
//! # Example
//!
//! ```rust
//! use mavcodec::{compile, CompileOptions};
//! use mavcodec::loader::XmlSource;
//!
//! let source = XmlSource::parse(
//!     r#"<mavlink file="minimal.xml">
//!         <messages>
//!             <message id="0" name="HEARTBEAT">
//!                 <description>The heartbeat message.</description>
//!                 <field type="uint8_t" name="type">Type of the system.</field>
//!             </message>
//!         </messages>
//!     </mavlink>"#,
//!     None,
//! ).unwrap();
//!
//! let dialect = compile("minimal", &[source], CompileOptions::default()).unwrap();
//! let heartbeat = dialect.message_by_name("heartbeat").unwrap();
//! assert_eq!(heartbeat.payload_size_v2(), 1);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod compiler;
pub mod crc;
pub mod errors;
pub mod loader;
mod merge;
pub mod normalize;
pub mod protocol;
pub mod xml;

use loader::XmlSource;
use protocol::MergedDialect;

pub use errors::CompileError;

/// Options for the top-level [`compile`] orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Collect `<description>` text for enum groups, enum entries, and messages into
    /// [`MergedDialect::descriptions`](protocol::MergedDialect::descriptions). Disabled by
    /// default since description collection never affects codec correctness.
    pub descriptions: bool,
}

/// Compiles `root_name` and every dialect it transitively `<include>`s (drawn from `sources`)
/// into a single [`MergedDialect`].
///
/// Sequence: resolve the include closure → compile each dialect →
/// merge them in dependency order, included dialects first. Every error is fatal: no
/// partial descriptor is ever returned.
pub fn compile(root_name: &str, sources: &[XmlSource], options: CompileOptions) -> Result<MergedDialect, CompileError> {
    let ordered = loader::resolve_includes(root_name, sources)?;

    let mut dialects = Vec::with_capacity(ordered.len());
    for source in ordered {
        dialects.push(compiler::compile_dialect(source.name(), source.root(), options.descriptions)?);
    }

    merge::merge_dialects(root_name, dialects)
}
