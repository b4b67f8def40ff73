use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const REFRESH_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const APP_TITLE: &str = "タイマータスクアプリ";
pub(crate) const LIST_TITLE: &str = "タスク一覧";
pub(crate) const INPUT_PLACEHOLDER: &str = "新しいタスクを入力";
pub(crate) const ADD_LABEL: &str = "追加";
pub(crate) const START_LABEL: &str = "開始";
pub(crate) const STOP_LABEL: &str = "停止";

pub(crate) const STATUS_ENTER_ADD: &str = "Type a task title • Enter to add • Esc to cancel";
pub(crate) const STATUS_EMPTY_TITLE: &str = "Enter a title before adding a task";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No task selected";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
