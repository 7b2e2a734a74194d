use slidegenius_common::{GeneratedFile, TemplateFile};
use slidegenius_core::download::FsDownloads;
use slidegenius_core::{Page, TextField};
use std::io;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Raw form values gathered from flags, config and files.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub text: String,
    pub guidance: String,
    pub provider: String,
    pub api_key: String,
}

/// Terminal rendition of the page: alerts go to stderr, the preview container
/// is kept in memory and downloads land in the output directory.
pub struct TerminalPage {
    fields: FormFields,
    template: Option<TemplateFile>,
    preview: Vec<String>,
    downloads: FsDownloads,
}

impl TerminalPage {
    pub fn new(fields: FormFields, template: Option<TemplateFile>, out_dir: PathBuf) -> Self {
        Self {
            fields,
            template,
            preview: Vec::new(),
            downloads: FsDownloads::new(out_dir),
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        self.downloads.saved()
    }

    /// The preview container's inner HTML.
    pub fn preview_container(&self) -> String {
        format!(
            "<div id=\"outlinePreview\">{}</div>",
            self.preview.concat()
        )
    }

    /// Standalone HTML document holding the preview container.
    pub fn preview_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>SlideGenius outline</title></head>\n<body>\n{}\n</body>\n</html>\n",
            self.preview_container()
        )
    }
}

impl Page for TerminalPage {
    type Staged = NamedTempFile;

    fn read_field(&self, field: TextField) -> String {
        match field {
            TextField::SourceText => self.fields.text.clone(),
            TextField::Guidance => self.fields.guidance.clone(),
            TextField::Provider => self.fields.provider.clone(),
            TextField::ApiKey => self.fields.api_key.clone(),
        }
    }

    fn selected_template(&self) -> Option<TemplateFile> {
        self.template.clone()
    }

    fn alert(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn clear_preview(&mut self) {
        self.preview.clear();
    }

    fn append_preview_entry(&mut self, html: String) {
        self.preview.push(html);
    }

    fn stage_download(&mut self, file: GeneratedFile) -> io::Result<NamedTempFile> {
        self.downloads.stage(&file)
    }

    fn trigger_download(&mut self, staged: &NamedTempFile, file_name: &str) -> io::Result<()> {
        self.downloads.trigger(staged, file_name).map(|_| ())
    }

    fn release_download(&mut self, staged: NamedTempFile) {
        self.downloads.release(staged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegenius_common::OUTPUT_FILE_NAME;
    use slidegenius_core::download::deliver;

    #[test]
    fn test_preview_document_wraps_entries() {
        let mut page = TerminalPage::new(FormFields::default(), None, PathBuf::from("."));
        page.append_preview_entry("<div>one</div>".to_string());
        page.append_preview_entry("<div>two</div>".to_string());

        assert_eq!(
            page.preview_container(),
            "<div id=\"outlinePreview\"><div>one</div><div>two</div></div>"
        );
        assert!(page.preview_document().starts_with("<!DOCTYPE html>"));

        page.clear_preview();
        assert_eq!(page.preview_container(), "<div id=\"outlinePreview\"></div>");
    }

    #[test]
    fn test_fields_are_returned_raw() {
        let fields = FormFields {
            text: "  padded  ".to_string(),
            ..Default::default()
        };
        let page = TerminalPage::new(fields, None, PathBuf::from("."));
        assert_eq!(page.read_field(TextField::SourceText), "  padded  ");
    }

    #[test]
    fn test_deliver_writes_output_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut page = TerminalPage::new(FormFields::default(), None, tmp.path().to_path_buf());

        deliver(&mut page, GeneratedFile::new(b"PK".to_vec())).unwrap();

        assert_eq!(page.saved(), &[tmp.path().join(OUTPUT_FILE_NAME)]);
        assert_eq!(
            std::fs::read(tmp.path().join(OUTPUT_FILE_NAME)).unwrap(),
            b"PK".to_vec()
        );
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
