//! Colored terminal output for the Coinplay CLI.
//!
//! One method per line kind. Errors land on stderr so scripts can split
//! the streams; everything else goes to stdout. The `colored` flag is
//! wired to `--no-color`, which keeps output stable under test.

use owo_colors::OwoColorize;

const LOGO: &str = r#"
  ___   ___   ___  _  _  ___  _        _   __   __
 / __| / _ \ |_ _|| \| || _ \| |      /_\  \ \ / /
| (__ | (_) | | | | .` ||  _/| |__   / _ \  \ V /
 \___| \___/ |___||_|\_||_|  |____| /_/ \_\  |_|"#;

/// Line-oriented terminal writer.
pub struct Output {
    /// Whether ANSI styling is applied
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Writer with ANSI styling on.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Writer with ANSI styling off.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Startup banner with the package version.
    pub fn banner(&self) {
        let tagline = format!(
            "Credential-Gated Wager Backend v{}",
            env!("CARGO_PKG_VERSION")
        );
        if !self.colored {
            println!("{LOGO}");
            println!("\n   {tagline}\n");
            return;
        }
        for (row, text) in LOGO.lines().enumerate() {
            if row < 3 {
                println!("{}", text.bright_cyan().bold());
            } else {
                println!("{}", text.blue().bold());
            }
        }
        println!("\n   {}\n", tagline.bright_white().bold());
    }

    /// Green check line.
    pub fn success(&self, message: &str) {
        if !self.colored {
            println!("  [ok] {message}");
            return;
        }
        println!("  {} {}", "✓".green().bold(), message.green());
    }

    /// Neutral bullet line.
    pub fn info(&self, message: &str) {
        if !self.colored {
            println!("  [info] {message}");
            return;
        }
        println!("  {} {message}", "•".blue());
    }

    /// Yellow warning line.
    pub fn warning(&self, message: &str) {
        if !self.colored {
            println!("  [warn] {message}");
            return;
        }
        println!("  {} {}", "!".yellow().bold(), message.yellow());
    }

    /// Red error line, written to stderr.
    pub fn error(&self, message: &str) {
        if !self.colored {
            eprintln!("  [error] {message}");
            return;
        }
        eprintln!("  {} {}", "✗".red().bold(), message.red());
    }

    /// Line for a freshly written file.
    pub fn created(&self, kind: &str, path: &str) {
        if !self.colored {
            println!("  [new] {kind} {path}");
            return;
        }
        println!(
            "  {} {} {}",
            "+".green().bold(),
            kind.dimmed(),
            path.bright_white()
        );
    }

    /// Line for a freshly created directory.
    pub fn created_dir(&self, path: &str) {
        self.created("directory", path);
    }

    /// Line for a file left untouched.
    pub fn skipped(&self, path: &str, reason: &str) {
        if !self.colored {
            println!("  [skip] {path} ({reason})");
            return;
        }
        println!(
            "  {} {} {}",
            "-".yellow(),
            path.dimmed(),
            format!("({reason})").yellow()
        );
    }

    /// Underlined section title.
    pub fn header(&self, title: &str) {
        if !self.colored {
            println!("\n  == {title} ==");
            return;
        }
        println!("\n  {}", title.bright_white().bold().underline());
    }

    /// Smaller section title.
    pub fn subheader(&self, title: &str) {
        if !self.colored {
            println!("\n  -- {title} --");
            return;
        }
        println!("\n  {}", title.cyan().bold());
    }

    /// Indented `key: value` line.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.colored {
            println!("    {key}: {value}");
            return;
        }
        println!("    {}: {}", key.dimmed(), value.bright_white());
    }

    /// Dimmed tip line.
    pub fn hint(&self, message: &str) {
        if !self.colored {
            println!("\n  tip: {message}");
            return;
        }
        println!("\n  {} {}", "tip:".dimmed(), message.dimmed().italic());
    }

    /// Shell command suggestion.
    pub fn command(&self, cmd: &str) {
        if !self.colored {
            println!("     $ {cmd}");
            return;
        }
        println!("     {}", format!("$ {cmd}").bright_cyan());
    }

    /// Closing success line.
    pub fn complete(&self, message: &str) {
        if !self.colored {
            println!("\n  [done] {message}");
            return;
        }
        println!("\n  {}", message.bright_green().bold());
    }

    /// Blank line.
    pub fn newline(&self) {
        println!();
    }
}
