// ==========================================
// 地理编码查找表 - Parquet 写出器
// ==========================================
// 格式: 单行组；每列 OPTIONAL BYTE_ARRAY (UTF8)；NULL 用定义级别保留
// 压缩: ZSTD
// ==========================================

use crate::domain::table::Table;
use crate::exporter::{ensure_parent_dir, TableWriter};
use crate::importer::error::ImportResult;
use parquet::basic::{Compression, LogicalType, Repetition, Type as PhysicalType, ZstdLevel};
use parquet::data_type::{ByteArray, ByteArrayType};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::{Type, TypePtr};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetTableWriter;

impl ParquetTableWriter {
    // 全部列按可空字符串处理
    fn build_schema(columns: &[String]) -> ImportResult<TypePtr> {
        let fields = columns
            .iter()
            .map(|name| {
                Type::primitive_type_builder(name, PhysicalType::BYTE_ARRAY)
                    .with_repetition(Repetition::OPTIONAL)
                    .with_logical_type(Some(LogicalType::String))
                    .build()
                    .map(Arc::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = Type::group_type_builder("schema")
            .with_fields(fields)
            .build()?;
        Ok(Arc::new(schema))
    }

    /// 单列的非空值与定义级别（1 = 有值，0 = NULL）
    fn column_values(table: &Table, col_index: usize) -> (Vec<ByteArray>, Vec<i16>) {
        let mut values = Vec::with_capacity(table.rows.len());
        let mut def_levels = Vec::with_capacity(table.rows.len());

        for row in &table.rows {
            match row.get(col_index).and_then(|v| v.as_deref()) {
                Some(value) => {
                    values.push(ByteArray::from(value));
                    def_levels.push(1);
                }
                None => def_levels.push(0),
            }
        }

        (values, def_levels)
    }

    fn write_file(table: &Table, path: &Path) -> ImportResult<()> {
        ensure_parent_dir(path)?;

        let schema = Self::build_schema(&table.columns)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(ZstdLevel::default()))
            .build();

        let file = File::create(path)?;
        let mut writer = SerializedFileWriter::new(file, schema, Arc::new(props))?;
        {
            let mut row_group = writer.next_row_group()?;

            // 按 schema 顺序逐列写出
            let mut col_index = 0;
            while let Some(mut column) = row_group.next_column()? {
                let (values, def_levels) = Self::column_values(table, col_index);
                column
                    .typed::<ByteArrayType>()
                    .write_batch(&values, Some(&def_levels), None)?;
                column.close()?;
                col_index += 1;
            }
            row_group.close()?;
        }
        writer.close()?;

        Ok(())
    }
}

impl TableWriter for ParquetTableWriter {
    fn format(&self) -> &'static str {
        "parquet"
    }

    fn write_table(&self, table: &Table, path: &Path) -> ImportResult<()> {
        let result = Self::write_file(table, path);
        if result.is_err() && path.exists() {
            // 不保留写了一半的文件
            let _ = std::fs::remove_file(path);
        }
        result
    }
}
