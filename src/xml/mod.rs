//! Minimal navigable XML tree.
//!
//! The compiler never reads bytes from disk and never decodes character encodings — that's a
//! boundary adapter's job. What it does consume is an already-parsed tree: this module turns a
//! block of XML text into that tree using [`quick_xml`], the same crate the rest of this
//! compiler's ancestry uses for streaming parse. Everything downstream (the enum compiler, the
//! message compiler) only ever walks [`Element`]s; it never sees a byte stream again.

mod tree;

pub use tree::Element;
