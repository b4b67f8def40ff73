use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::cli::{CliCommand, FormatArgs, TasksArgs};
use crate::config::AppConfig;
use crate::core::{format_time, TaskCollection};
use crate::model::Task;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Tasks(args) => handle_tasks(config, &args, &mut writer),
        CliCommand::Format(args) => handle_format(&args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_tasks<W: Write>(config: &AppConfig, args: &TasksArgs, mut writer: W) -> Result<()> {
    let collection = TaskCollection::from_seed(config.seed());

    if args.json {
        let json =
            serde_json::to_string_pretty(collection.tasks()).context("failed to encode tasks")?;
        writeln!(writer, "{json}")?;
        return Ok(());
    }

    if collection.is_empty() {
        writeln!(writer, "No tasks")?;
        return Ok(());
    }

    for task in &collection {
        writeln!(writer, "{}", TaskLine(task))?;
    }
    Ok(())
}

fn handle_format<W: Write>(args: &FormatArgs, mut writer: W) -> Result<()> {
    for seconds in &args.seconds {
        writeln!(writer, "{}", format_time(*seconds))?;
    }
    Ok(())
}

struct TaskLine<'a>(&'a Task);

impl fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.0;
        write!(
            f,
            "{:>4}  [{}]  {}  {}",
            task.id,
            if task.completed { "x" } else { " " },
            format_time(task.time_spent),
            task.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf());
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn tasks_command_lists_seed_tasks() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Tasks(TasksArgs { json: false }));

        assert_eq!(
            output,
            "   1  [ ]  00:00:00  タスク1\n   2  [ ]  00:00:00  タスク2\n"
        );
    }

    #[test]
    fn tasks_command_emits_json_read_views() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Tasks(TasksArgs { json: true }));

        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value[0]["title"], "タスク1");
        assert_eq!(value[1]["timeSpent"], 0);
        assert_eq!(value[1]["completed"], false);
    }

    #[test]
    fn tasks_command_reports_empty_board() {
        let (config, _dir) = temp_config();
        let config = config.with_seed(Seed::Empty);
        let output = run(&config, CliCommand::Tasks(TasksArgs { json: false }));

        assert_eq!(output, "No tasks\n");
    }

    #[test]
    fn format_command_prints_each_value() {
        let (config, _dir) = temp_config();
        let output = run(
            &config,
            CliCommand::Format(FormatArgs {
                seconds: vec![0, 61, 3661],
            }),
        );

        assert_eq!(output, "00:00:00\n00:01:01\n01:01:01\n");
    }

    #[test]
    fn tui_is_not_a_batch_command() {
        let (config, _dir) = temp_config();
        let mut output = Vec::new();
        assert!(execute(&config, CliCommand::Tui, &mut output).is_err());
    }
}
