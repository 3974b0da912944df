use std::io::Write;

use crate::deserialize::Value;
use crate::error::{Error, Result};
use crate::metadata::{logical_columns, KeyValue, LogicalDescriptor, SchemaDescriptor};
use crate::page::CompressedPage;

use super::serialize::{lists_to_page, map_to_pages, values_to_page};
use super::{DynIter, FileWriter, WriteOptions};

/// Buffers rows in memory and writes them as row groups, flushing whenever
/// the configured number of rows has accumulated. Rows are released on every
/// flush; the footer is written on [`RowWriter::end`].
pub struct RowWriter<W: Write> {
    writer: FileWriter<W>,
    columns: Vec<LogicalDescriptor>,
    // buffered cells, column-major
    buffered: Vec<Vec<Value>>,
    num_buffered_rows: usize,
    max_row_group_size: usize,
}

impl<W: Write> RowWriter<W> {
    /// Returns a new [`RowWriter`] and writes the file's header.
    pub fn try_new(
        writer: W,
        schema: SchemaDescriptor,
        options: WriteOptions,
        max_row_group_size: usize,
        created_by: Option<String>,
    ) -> Result<Self> {
        if max_row_group_size == 0 {
            return Err(Error::oos("a row group must hold at least one row"));
        }
        let columns = logical_columns(&schema);
        let mut writer = FileWriter::new(writer, schema, options, created_by);
        writer.start()?;
        Ok(Self {
            writer,
            buffered: vec![vec![]; columns.len()],
            columns,
            num_buffered_rows: 0,
            max_row_group_size,
        })
    }

    /// The logical columns a row must provide, in schema order.
    pub fn columns(&self) -> &[LogicalDescriptor] {
        &self.columns
    }

    /// Buffers one row; `row` must contain one [`Value`] per logical column.
    pub fn write_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::oos(format!(
                "the row has {} values but the schema has {} logical columns",
                row.len(),
                self.columns.len()
            )));
        }
        for (cell, buffer) in row.into_iter().zip(self.buffered.iter_mut()) {
            buffer.push(cell);
        }
        self.num_buffered_rows += 1;
        if self.num_buffered_rows == self.max_row_group_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Drains the buffered rows into one row group.
    fn flush(&mut self) -> Result<()> {
        if self.num_buffered_rows == 0 {
            return Ok(());
        }
        let num_rows = self.num_buffered_rows;
        self.num_buffered_rows = 0;
        let buffered = std::mem::replace(&mut self.buffered, vec![vec![]; self.columns.len()]);

        let options = *self.writer.options();
        let mut chunks: Vec<Result<DynIter<'static, Result<CompressedPage>>>> = vec![];
        for (column, cells) in self.columns.iter().zip(buffered) {
            match column {
                LogicalDescriptor::Primitive(leaf) => {
                    let page = values_to_page(cells, leaf, &options)?;
                    chunks.push(Ok(DynIter::new(std::iter::once(Ok(page)))));
                }
                LogicalDescriptor::List(leaf) => {
                    let lists = cells
                        .into_iter()
                        .map(|cell| match cell {
                            Value::List(list) => Ok(list),
                            cell => Err(Error::oos(format!(
                                "the column {:?} requires lists, got {:?}",
                                leaf.path_in_schema(),
                                cell
                            ))),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    let page = lists_to_page(&lists, leaf, &options)?;
                    chunks.push(Ok(DynIter::new(std::iter::once(Ok(page)))));
                }
                LogicalDescriptor::Map { key, value } => {
                    let maps = cells
                        .into_iter()
                        .map(|cell| match cell {
                            Value::Map(map) => Ok(map),
                            cell => Err(Error::oos(format!(
                                "the column {:?} requires maps, got {:?}",
                                key.path_in_schema(),
                                cell
                            ))),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    let (key_page, value_page) = map_to_pages(&maps, key, value, &options)?;
                    chunks.push(Ok(DynIter::new(std::iter::once(Ok(key_page)))));
                    chunks.push(Ok(DynIter::new(std::iter::once(Ok(value_page)))));
                }
            }
        }

        let row_group = DynIter::new(chunks.into_iter());
        self.writer.write(row_group, num_rows)
    }

    /// Flushes any buffered rows and writes the footer. Returns the total
    /// file size and the underlying writer.
    pub fn end(mut self, key_value_metadata: Option<Vec<KeyValue>>) -> Result<(u64, W)> {
        self.flush()?;
        self.writer.end(key_value_metadata)
    }
}
