pub mod editable_sheet_table;
pub mod final_calculation;
pub mod header;
pub mod login_screen;
pub mod stock_sheet_page;
pub mod user_menu;
