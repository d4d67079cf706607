// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_reporter;
pub mod mock_workbook;
pub mod test_data_builder;
pub mod xlsx_fixture;
