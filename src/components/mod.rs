pub mod cells;
pub mod clock;
pub mod column_table;
pub mod columns;
pub mod data_table;
pub mod native_table;
pub mod pagination_bar;
pub mod review_form;
pub mod reviews_table;
pub mod scroll_custom;
pub mod scroll_virtual;
pub mod settings_panel;
pub mod tab_presence;
