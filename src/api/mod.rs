//! API 模块
//!
//! Google REST 接口的请求/响应结构

pub mod drive;
pub mod forms;
pub mod sheets;

pub use forms::{
    BatchUpdateFormRequest, ChoiceOption, ChoiceQuestion, ChoiceType, CreateFormRequest,
    CreateItemRequest, CreatedForm, FormInfo, Item, Location, QuestionItem, QuestionKind,
    QuestionSpec, Request, TextQuestion,
};
pub use drive::{DriveFile, DriveFileList};
pub use sheets::{SheetProperties, SpreadsheetMeta, ValueRange};
