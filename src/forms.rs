//! 表单模型与客户端校验
//!
//! 登录/注册只做非空检查，真正的校验交给认证服务；
//! 上传表单有字符白名单过滤与描述字数要求。

use crate::error::ClientError;
use std::fmt;
use streamflow_shared::{LoginRequest, RegisterRequest};

/// 标题与描述允许出现的标点
pub const ALLOWED_PUNCTUATION: &[char] = &['.', ',', '!', '?', '"', '\'', '(', ')', '_', '-'];

/// 过滤掉白名单之外的字符（ASCII 字母数字、空白、`ALLOWED_PUNCTUATION`）
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(c))
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// =========================================================
// 登录 / 注册
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingField(&'static str),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingField(field) => write!(f, "Please enter your {}", field),
        }
    }
}

impl From<FormError> for ClientError {
    fn from(e: FormError) -> Self {
        ClientError::validation(e.to_string())
    }
}

fn require(value: &str, field: &'static str) -> Result<String, FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            username: require(&self.username, "username")?,
            password: require(&self.password, "password")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        Ok(RegisterRequest {
            username: require(&self.username, "username")?,
            email: require(&self.email, "email")?,
            password: require(&self.password, "password")?,
        })
    }
}

// =========================================================
// 上传
// =========================================================

/// 已读入内存的待上传文件
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    NoFile,
    TitleRequired,
    DescriptionRequired,
    DescriptionTooShort,
}

impl UploadError {
    pub fn message(&self) -> &'static str {
        match self {
            UploadError::NoFile => "No file selected",
            UploadError::TitleRequired => "Title is required",
            UploadError::DescriptionRequired => "Description is required",
            UploadError::DescriptionTooShort => "Description must contain at least 2 words",
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<UploadError> for ClientError {
    fn from(e: UploadError) -> Self {
        ClientError::validation(e.message())
    }
}

/// 校验通过、可以直接提交的上传内容
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSubmission {
    pub file: UploadFile,
    pub title: String,
    pub description: String,
    pub uploader: String,
    pub duration: Option<f64>,
}

/// 一次文件选择的凭据
///
/// 读取文件与探测时长都是异步的，结果只能写回到仍然有效的那次选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSelection(u64);

/// 上传表单的编辑状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDraft {
    file: Option<UploadFile>,
    title: String,
    description: String,
    duration: Option<f64>,
    selection: u64,
}

impl UploadDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// 输入时即过滤
    pub fn set_title(&mut self, value: &str) {
        self.title = sanitize(value);
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = sanitize(value);
    }

    /// 开始一次新的选择：清空当前文件与时长，之前所有凭据失效
    pub fn begin_selection(&mut self) -> FileSelection {
        self.selection += 1;
        self.file = None;
        self.duration = None;
        FileSelection(self.selection)
    }

    pub fn is_current(&self, selection: FileSelection) -> bool {
        selection.0 == self.selection
    }

    /// 过期的凭据被忽略并返回 false
    pub fn set_file_for(&mut self, selection: FileSelection, file: Option<UploadFile>) -> bool {
        if !self.is_current(selection) {
            return false;
        }
        self.file = file;
        self.duration = None;
        true
    }

    pub fn set_duration_for(&mut self, selection: FileSelection, duration: Option<f64>) -> bool {
        if !self.is_current(selection) {
            return false;
        }
        self.duration = duration.filter(|d| d.is_finite() && *d >= 0.0);
        true
    }

    /// 同步地选择一个文件
    pub fn set_file(&mut self, file: Option<UploadFile>) -> FileSelection {
        let selection = self.begin_selection();
        self.set_file_for(selection, file);
        selection
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some()
            && !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
    }

    /// 清空表单；进行中的读取与探测随之作废
    pub fn reset(&mut self) {
        let selection = self.selection + 1;
        *self = Self::default();
        self.selection = selection;
    }

    pub fn validate(&self, uploader: &str) -> Result<UploadSubmission, UploadError> {
        let file = self.file.clone().ok_or(UploadError::NoFile)?;

        let title = sanitize(self.title.trim());
        if title.trim().is_empty() {
            return Err(UploadError::TitleRequired);
        }

        let description = sanitize(self.description.trim());
        if description.trim().is_empty() {
            return Err(UploadError::DescriptionRequired);
        }
        if word_count(&description) < 2 {
            return Err(UploadError::DescriptionTooShort);
        }

        Ok(UploadSubmission {
            file,
            title,
            description,
            uploader: uploader.to_string(),
            duration: self.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> UploadFile {
        UploadFile {
            name: "clip.mp4".into(),
            content_type: "video/mp4".into(),
            data: vec![0; 4],
        }
    }

    #[test]
    fn sanitize_strips_outside_whitelist() {
        assert_eq!(sanitize("Héllo <world>! #1 (ok)_-"), "Hllo world! 1 (ok)_-");
        assert_eq!(sanitize("say \"hi\", it's fine?"), "say \"hi\", it's fine?");
        assert_eq!(sanitize("a;b:c/d\\e"), "abcde");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in ["<script>alert(1)</script>", "über cool!!", "tabs\tand\nnewlines", ""] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: "ann".into(),
            password: "  ".into(),
        };
        assert_eq!(form.validate(), Err(FormError::MissingField("password")));

        let form = LoginForm {
            username: "ann".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate().unwrap().username, "ann");
    }

    #[test]
    fn register_requires_email() {
        let form = RegisterForm {
            username: "ann".into(),
            email: String::new(),
            password: "pw".into(),
        };
        assert_eq!(form.validate(), Err(FormError::MissingField("email")));
    }

    #[test]
    fn upload_validation_order() {
        let mut draft = UploadDraft::default();
        assert_eq!(draft.validate("ann"), Err(UploadError::NoFile));

        draft.set_file(Some(file()));
        assert_eq!(draft.validate("ann"), Err(UploadError::TitleRequired));

        draft.set_title("  <<>>  ");
        assert_eq!(draft.validate("ann"), Err(UploadError::TitleRequired));

        draft.set_title("My clip");
        assert_eq!(draft.validate("ann"), Err(UploadError::DescriptionRequired));
    }

    #[test]
    fn description_needs_two_words() {
        let mut draft = UploadDraft::default();
        draft.set_file(Some(file()));
        draft.set_title("Clip");

        draft.set_description("one");
        assert_eq!(
            draft.validate("ann").unwrap_err().message(),
            "Description must contain at least 2 words"
        );

        draft.set_description("one two");
        let submission = draft.validate("ann").unwrap();
        assert_eq!(submission.description, "one two");
        assert_eq!(submission.uploader, "ann");
    }

    #[test]
    fn new_file_clears_probed_duration() {
        let mut draft = UploadDraft::default();
        let first = draft.set_file(Some(file()));
        assert!(draft.set_duration_for(first, Some(31.5)));
        assert_eq!(draft.duration(), Some(31.5));

        let second = draft.set_file(Some(file()));
        assert_eq!(draft.duration(), None);

        assert!(draft.set_duration_for(second, Some(f64::NAN)));
        assert_eq!(draft.duration(), None);
    }

    #[test]
    fn late_results_for_an_old_selection_are_dropped() {
        let mut draft = UploadDraft::default();
        let a = draft.begin_selection();
        let b = draft.begin_selection();

        let clip_b = UploadFile {
            name: "b.mp4".into(),
            ..file()
        };
        assert!(draft.set_file_for(b, Some(clip_b)));

        // A 的读取与探测晚于 B 完成
        assert!(!draft.set_file_for(a, Some(file())));
        assert!(!draft.set_duration_for(a, Some(12.0)));
        assert_eq!(draft.file().map(|f| f.name.as_str()), Some("b.mp4"));
        assert_eq!(draft.duration(), None);

        assert!(draft.set_duration_for(b, None));
        draft.set_title("Clip");
        draft.set_description("two words");
        assert_eq!(draft.validate("ann").unwrap().duration, None);
    }

    #[test]
    fn reset_invalidates_pending_selection() {
        let mut draft = UploadDraft::default();
        let pending = draft.begin_selection();
        draft.reset();
        assert!(!draft.is_current(pending));
        assert!(!draft.set_file_for(pending, Some(file())));
        assert!(draft.file().is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut draft = UploadDraft::default();
        draft.set_file(Some(file()));
        draft.set_title("t");
        draft.set_description("a b");
        assert!(draft.can_submit());
        draft.reset();
        assert!(draft.file().is_none());
        assert_eq!(draft.title(), "");
        assert_eq!(draft.description(), "");
        assert_eq!(draft.duration(), None);
        assert!(!draft.can_submit());
    }
}
