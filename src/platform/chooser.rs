//! dmenu-style chooser driven as a child process.
//!
//! Lines go to the program's stdin, the selection comes back on stdout.
//! Exit status 1 means the user dismissed the menu.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{Chooser, Selection};
use crate::config::ChooserConfig;
use crate::error::{CalcError, CalcResult};

/// Exit status dmenu-compatible programs use for "cancelled".
const CANCELLED_STATUS: i32 = 1;

/// Argument template for the known launchers.
fn default_args(program: &str) -> &'static [&'static str] {
    match program {
        "rofi" => &[
            "-dmenu",
            "-p",
            "{prompt}",
            "-format",
            "s",
            "-l",
            "{lines}",
            "-matching",
            "normal",
            "-no-fixed-num-lines",
        ],
        "wofi" => &["--dmenu", "--prompt", "{prompt}", "--lines", "{lines}"],
        "fuzzel" => &["--dmenu", "--prompt", "{prompt} ", "--lines", "{lines}"],
        "tofi" => &["--prompt-text", "{prompt} "],
        _ => &["-p", "{prompt}", "-l", "{lines}"],
    }
}

pub struct CommandChooser {
    program: String,
    template: Vec<String>,
    lines: u32,
}

impl CommandChooser {
    pub fn new(config: &ChooserConfig) -> Self {
        let program = config.program.trim().to_string();
        let base = Path::new(&program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let template = match config.args {
            Some(ref args) => args.clone(),
            None => {
                let mut args: Vec<String> =
                    default_args(&base).iter().map(|s| s.to_string()).collect();
                if let (Some(theme), "rofi") = (&config.theme, base.as_str()) {
                    args.push("-theme".to_string());
                    args.push(theme.clone());
                }
                args
            }
        };

        Self {
            program,
            template,
            lines: config.lines,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument list for one invocation, placeholders filled in.
    pub fn args(&self, prompt: &str) -> Vec<String> {
        let lines = self.lines.to_string();
        self.template
            .iter()
            .map(|arg| arg.replace("{prompt}", prompt).replace("{lines}", &lines))
            .collect()
    }
}

impl Chooser for CommandChooser {
    fn choose(&self, prompt: &str, lines: &[String]) -> CalcResult<Selection> {
        let mut child = Command::new(&self.program)
            .args(self.args(prompt))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CalcError::ChooserMissing(self.program.clone()),
                _ => CalcError::Chooser(format!("failed to start {}: {}", self.program, e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut body = lines.join("\n");
            body.push('\n');
            write_ignore_broken_pipe(&mut stdin, body.as_bytes())
                .map_err(|e| CalcError::Chooser(format!("failed to write menu: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CalcError::Chooser(format!("failed to wait for {}: {}", self.program, e)))?;

        match output.status.code() {
            Some(0) => {
                let picked = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(Selection::Picked(picked))
            }
            Some(CANCELLED_STATUS) => Ok(Selection::Cancelled),
            Some(code) => Err(CalcError::Chooser(format!(
                "{} exited with code {}: {}",
                self.program,
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
            None => Err(CalcError::Chooser(format!(
                "{} was terminated by a signal",
                self.program
            ))),
        }
    }

    fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }
}

/// The chooser may exit before reading the whole menu.
fn write_ignore_broken_pipe<W: Write>(w: &mut W, bytes: &[u8]) -> io::Result<()> {
    match w.write_all(bytes) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Resolve a program name against `PATH`.
fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chooser(program: &str) -> CommandChooser {
        CommandChooser::new(&ChooserConfig {
            program: program.to_string(),
            ..ChooserConfig::default()
        })
    }

    #[test]
    fn test_rofi_args() {
        let args = chooser("rofi").args("Calc:");
        assert_eq!(args[..3], ["-dmenu", "-p", "Calc:"]);
        assert!(args.windows(2).any(|w| w == ["-l", "12"]));
        assert!(args.windows(2).any(|w| w == ["-matching", "normal"]));
        assert!(!args.contains(&"-theme".to_string()));
    }

    #[test]
    fn test_rofi_theme() {
        let chooser = CommandChooser::new(&ChooserConfig {
            theme: Some("Adapta-Nokto".into()),
            ..ChooserConfig::default()
        });
        let args = chooser.args("Calc:");
        assert!(args.ends_with(&["-theme".to_string(), "Adapta-Nokto".to_string()]));
    }

    #[test]
    fn test_program_path_uses_basename() {
        let args = chooser("/usr/bin/wofi").args("=");
        assert_eq!(args, ["--dmenu", "--prompt", "=", "--lines", "12"]);
    }

    #[test]
    fn test_custom_args() {
        let chooser = CommandChooser::new(&ChooserConfig {
            program: "bemenu".into(),
            args: Some(vec!["--prompt".into(), "{prompt}".into(), "-l{lines}".into()]),
            lines: 8,
            ..ChooserConfig::default()
        });
        assert_eq!(chooser.args("Calc"), ["--prompt", "Calc", "-l8"]);
    }

    #[test]
    fn test_missing_program() {
        let chooser = chooser("quickcalc-no-such-chooser");
        assert!(!chooser.is_available());
        assert!(matches!(
            chooser.choose("p", &[]),
            Err(CalcError::ChooserMissing(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_codes() {
        let run = |script: &str| {
            CommandChooser::new(&ChooserConfig {
                program: "sh".into(),
                args: Some(vec!["-c".into(), script.into()]),
                ..ChooserConfig::default()
            })
            .choose("p", &["a".to_string(), "b".to_string()])
        };

        assert_eq!(
            run("head -n 1").unwrap(),
            Selection::Picked("a".to_string())
        );
        assert_eq!(run("exit 1").unwrap(), Selection::Cancelled);
        assert!(matches!(run("exit 3"), Err(CalcError::Chooser(_))));
    }
}
