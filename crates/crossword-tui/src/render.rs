use crate::app::{App, Field, SPINNER};
use crate::error::Severity;
use crate::format::BLOCK_CHAR;
use crate::session::SessionState;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

const LABEL_WIDTH: u16 = 24;
const FIELD_WIDTH: u16 = 44;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;
    execute!(stdout, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let form_width = LABEL_WIDTH + FIELD_WIDTH + 2;
    let x = if term_width > form_width {
        (term_width - form_width) / 2
    } else {
        1
    };
    let mut y = 1;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(app.theme.fg),
        Print("Crossword Solver")
    )?;
    y += 2;

    y = render_form(stdout, app, x, y)?;
    y = render_trigger(stdout, app, x, y + 1)?;
    y = render_status(stdout, app, x, y + 1)?;
    y = render_output(stdout, app, x, y + 1)?;
    render_controls(stdout, app, x, y + 1)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.ui.current_notification().is_some() {
        render_dialog(stdout, app, term_width, term_height)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_form(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;

    for (row, field) in Field::ALL.iter().enumerate() {
        let fy = y + row as u16 * 2;
        let focused = *field == app.focus;

        let text = app.field(*field);
        let visible = FIELD_WIDTH as usize - 2;
        // Keep the end of long paths in view
        let shown: String = if text.chars().count() > visible {
            text.chars().skip(text.chars().count() - visible).collect()
        } else {
            text.to_string()
        };
        let cursor = if focused { "_" } else { " " };

        execute!(
            stdout,
            MoveTo(x, fy),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.info),
            Print(format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize)),
            SetBackgroundColor(if focused { theme.focus_bg } else { theme.field_bg }),
            SetForegroundColor(theme.fg),
            Print(format!(
                " {:<width$}",
                format!("{}{}", shown, cursor),
                width = FIELD_WIDTH as usize - 1
            )),
            SetBackgroundColor(theme.bg)
        )?;
    }

    Ok(y + Field::ALL.len() as u16 * 2)
}

fn render_trigger(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;
    let width = (LABEL_WIDTH + FIELD_WIDTH) as usize;
    let label = "[ Solve ]";

    let (fg, bg) = if app.can_solve() {
        (theme.bg, theme.success)
    } else {
        (theme.disabled, theme.field_bg)
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(fg),
        SetBackgroundColor(bg),
        Print(format!("{:^width$}", label, width = width)),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(y + 1)
}

fn render_status(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;
    let state = app.ui.session.state();

    let color = match state {
        SessionState::Idle => theme.info,
        SessionState::Solving => theme.busy,
        SessionState::Solved => theme.success,
        SessionState::NoSolution => theme.key,
        SessionState::Error => theme.error,
    };

    let session = &app.ui.session;
    let status = match state {
        SessionState::Solving => {
            let name = session
                .request()
                .and_then(|r| r.structure_path.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{} {} {}", session.status_text(), SPINNER[app.spinner], name)
        }
        SessionState::Solved => {
            let words = session.assignment().map(|a| a.len()).unwrap_or(0);
            format!("{} ({} words)", session.status_text(), words)
        }
        SessionState::Error => {
            let detail = session.error_message().unwrap_or_default();
            let max = (LABEL_WIDTH + FIELD_WIDTH) as usize - 16;
            let detail: String = detail.chars().take(max).collect();
            format!("{}: {}", session.status_text(), detail)
        }
        SessionState::Idle | SessionState::NoSolution => session.status_text().to_string(),
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print("Status: "),
        SetForegroundColor(color),
        Print(status)
    )?;

    Ok(y + 1)
}

/// Result grid, each cell drawn three columns wide
fn render_output(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<u16> {
    let theme = &app.theme;
    let lines: Vec<&str> = if app.ui.output.is_empty() {
        Vec::new()
    } else {
        app.ui.output.split('\n').collect()
    };

    let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let inner = (cols * 3).max(FIELD_WIDTH as usize);

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print("┌"),
        Print("─".repeat(inner)),
        Print("┐")
    )?;

    let rows = lines.len().max(1);
    for row in 0..rows {
        let ry = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, ry),
            SetForegroundColor(theme.border),
            Print("│")
        )?;

        let line = lines.get(row).copied().unwrap_or("");
        for c in line.chars() {
            if c == BLOCK_CHAR {
                execute!(stdout, SetForegroundColor(theme.blocked), Print("███"))?;
            } else {
                execute!(
                    stdout,
                    SetForegroundColor(theme.letter),
                    Print(format!(" {} ", c))
                )?;
            }
        }

        execute!(
            stdout,
            Print(" ".repeat(inner - line.chars().count() * 3)),
            SetForegroundColor(theme.border),
            Print("│")
        )?;
    }

    let bottom = y + 1 + rows as u16;
    execute!(
        stdout,
        MoveTo(x, bottom),
        SetForegroundColor(theme.border),
        Print("└"),
        Print("─".repeat(inner)),
        Print("┘")
    )?;

    Ok(bottom + 1)
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("Tab/Arrows", "Next field"),
        ("Enter/F5", "Solve"),
        ("Ctrl+L", "Clear"),
        ("F2", "Theme"),
        ("Backspace", "Delete"),
        ("Esc", "Quit"),
    ];

    // Display in 2 columns
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 3;
        let row = i % 3;
        let cx = x + (col as u16) * 30;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>10}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.focus_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

/// Modal box for the oldest pending notification
fn render_dialog(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let Some(note) = app.ui.current_notification() else {
        return Ok(());
    };

    let (title, accent) = match note.severity {
        Severity::Info => ("Crossword Solver", theme.success),
        Severity::Error => ("Crossword Solver - Error", theme.error),
    };

    let dialog_width: u16 = 50u16.min(term_width.saturating_sub(2)).max(20);
    let text_width = dialog_width as usize - 4;
    let lines = wrap_text(&note.message, text_width);
    let dialog_height = lines.len() as u16 + 6;
    let x = term_width.saturating_sub(dialog_width) / 2;
    let y = term_height.saturating_sub(dialog_height) / 2;

    let bg = Color::Rgb {
        r: 30,
        g: 30,
        b: 40,
    };

    for row in 0..dialog_height {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(dialog_width as usize))
        )?;
    }

    execute!(stdout, SetForegroundColor(accent), SetBackgroundColor(bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(dialog_width as usize - 2)),
        Print("┐")
    )?;
    for row in 1..dialog_height - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + dialog_width - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + dialog_height - 1),
        Print("└"),
        Print("─".repeat(dialog_width as usize - 2)),
        Print("┘")
    )?;

    let title_x = x + dialog_width.saturating_sub(title.len() as u16) / 2;
    execute!(stdout, MoveTo(title_x, y + 1), Print(title))?;

    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x + 2, y + 3 + i as u16),
            SetForegroundColor(theme.fg),
            Print(line)
        )?;
    }

    let hint = "Enter to close";
    execute!(
        stdout,
        MoveTo(x + dialog_width.saturating_sub(hint.len() as u16) / 2, y + dialog_height - 2),
        SetForegroundColor(theme.info),
        Print(hint),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }

        // Hard-break words longer than a line, such as long paths
        while current.chars().count() > max_width {
            let head: String = current.chars().take(max_width).collect();
            let tail: String = current.chars().skip(max_width).collect();
            lines.push(head);
            current = tail;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("No solution could be generated for the chosen files.", 20);
        assert!(lines.iter().all(|l| l.len() <= 20));
        assert_eq!(lines.join(" "), "No solution could be generated for the chosen files.");
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text("cannot read /a/very/long/path/to/a/structure.txt", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.concat().replace(' ', ""), "cannotread/a/very/long/path/to/a/structure.txt");
    }
}
