//! Cell-at-a-time CSV output.
//!
//! Wraps a `csv::Writer` behind the engine's `write_cell(first_in_row, ..)`
//! contract. Quoting and escaping are the `csv` crate's responsibility;
//! this wrapper only batches cells into records and handles the optional
//! byte-order mark.

use std::io::Write;

use csv::ByteRecord;

use crate::error::Result;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Buffers cells into rows and serializes them with CSV quoting rules.
pub struct CellWriter<W: Write> {
    inner: csv::Writer<W>,
    record: ByteRecord,
    pending: bool,
}

impl<W: Write> CellWriter<W> {
    /// Create a writer, emitting a UTF-8 BOM first when requested.
    pub fn new(mut out: W, with_bom: bool) -> Result<Self> {
        if with_bom {
            out.write_all(UTF8_BOM)?;
        }
        Ok(Self {
            inner: csv::WriterBuilder::new().flexible(true).from_writer(out),
            record: ByteRecord::new(),
            pending: false,
        })
    }

    /// Append one cell. `first` marks the start of a new row; any buffered
    /// row is flushed at that point.
    pub fn write_cell(&mut self, first: bool, bytes: &[u8]) -> Result<()> {
        if first && self.pending {
            self.end_row()?;
        }
        self.record.push_field(bytes);
        self.pending = true;
        Ok(())
    }

    fn end_row(&mut self) -> Result<()> {
        self.inner.write_byte_record(&self.record)?;
        self.record.clear();
        self.pending = false;
        Ok(())
    }

    /// Flush the last buffered row and the underlying stream.
    pub fn finish(&mut self) -> Result<()> {
        if self.pending {
            self.end_row()?;
        }
        self.inner.flush()?;
        Ok(())
    }
}
