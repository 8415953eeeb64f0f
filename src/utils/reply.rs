/// Titled block of fields printed back to the shell, built the same way for every command
#[derive(Debug, Clone, Default)]
pub struct Reply {
    title: Option<String>,
    description: Option<String>,
    fields: Vec<(String, String, bool)>,
    footer: Option<String>,
}

impl Reply {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inline fields share a line with the inline fields next to them
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push((name.into(), value.into(), inline));
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(format!("== {} ==", title));
        }
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }

        let mut inline_run: Vec<String> = Vec::new();
        for (name, value, inline) in &self.fields {
            if *inline {
                inline_run.push(format!("{}: {}", name, value));
                continue;
            }
            if !inline_run.is_empty() {
                lines.push(inline_run.join("   "));
                inline_run.clear();
            }
            lines.push(format!("{}:", name));
            lines.extend(value.lines().map(|l| format!("  {}", l)));
        }
        if !inline_run.is_empty() {
            lines.push(inline_run.join("   "));
        }

        if let Some(footer) = &self.footer {
            lines.push(format!("-- {}", footer));
        }
        lines.join("\n")
    }
}

/// Text progress bar, e.g. "[#####-----] 50%"
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}
