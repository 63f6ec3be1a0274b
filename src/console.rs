use color_eyre::{eyre::eyre, eyre::Report, Result};
use superconsole::{style::Stylize, Component, Line, SuperConsole};

#[derive(Debug)]
pub struct BuildSummary {
    pub documents: usize,
    pub items: usize,
    pub pages: usize,
    pub elapsed: i64,
}

#[derive(Debug)]
pub struct ConsoleState {
    pub report: Option<Report>,
    pub summary: Option<BuildSummary>,
    pub warning: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct Console;

impl Component for Console {
    fn draw_unchecked(
        &self,
        state: &superconsole::State,
        _dimensions: superconsole::Dimensions,
        _mode: superconsole::DrawMode,
    ) -> anyhow::Result<superconsole::Lines> {
        let mut lines = vec![];
        let c_state = state.get::<ConsoleState>()?;

        if let Some(report) = &c_state.report {
            lines.push(Line(vec![
                "".to_string().dark_red().try_into()?,
                "Build failed".try_into()?,
            ]));
            lines.push(Line(vec!["Error:".try_into()?]));
            for (i, e) in report.chain().enumerate() {
                lines.push(Line(vec![
                    format!("    {i}: ").try_into()?,
                    e.to_string().dark_red().try_into()?,
                ]));
            }
        }

        if let Some(warning) = &c_state.warning {
            lines.push(Line(vec![
                "".to_string().dark_yellow().try_into()?,
                warning.to_string().try_into()?,
            ]));
        }

        if let Some(summary) = &c_state.summary {
            lines.push(Line(vec![
                "".to_string().dark_green().try_into()?,
                format!(
                    "Wrote {} documents ({} items, {} pages) in {} ms",
                    summary.documents, summary.items, summary.pages, summary.elapsed
                )
                .try_into()?,
            ]));
        }

        if let Some(message) = &c_state.message {
            lines.push(Line(vec![message.to_string().try_into()?]));
        }
        Ok(lines)
    }
}

pub struct ConsoleHandle {
    console: SuperConsole,
    state: ConsoleState,
}

impl ConsoleHandle {
    pub fn new() -> Result<ConsoleHandle> {
        let console = SuperConsole::new(Box::new(Console {}))
            .ok_or(eyre!("Could not initialize superconsole"))?;
        Ok(ConsoleHandle {
            console,
            state: ConsoleState {
                report: None,
                summary: None,
                warning: None,
                message: None,
            },
        })
    }

    fn render(&mut self) -> Result<()> {
        self.console
            .render(&superconsole::state!(&self.state))
            .map_err(|e| eyre!(Box::new(e)))
    }

    pub fn log_report(&mut self, report: Report) -> Result<()> {
        self.state.report = Some(report);
        self.render()?;
        self.state.report = None;
        Ok(())
    }

    pub fn log_summary(&mut self, summary: BuildSummary) -> Result<()> {
        self.state.summary = Some(summary);
        self.render()?;
        self.state.summary = None;
        Ok(())
    }

    pub fn log_warning(&mut self, warning: &str) -> Result<()> {
        self.state.warning = Some(warning.to_string());
        self.render()?;
        self.state.warning = None;
        Ok(())
    }

    pub fn log(&mut self, message: &str) -> Result<()> {
        self.state.message = Some(message.to_string());
        self.render()?;
        self.state.message = None;
        Ok(())
    }
}
