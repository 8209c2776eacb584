use crate::app::{DialogButton, DialogState};
use crate::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

const DIALOG_WIDTH: u16 = 60;

/// Lines `text` takes when word-wrapped to `width` columns
fn wrapped_line_count(text: &str, width: usize) -> usize {
    text.lines()
        .map(|line| {
            let mut lines = 1;
            let mut used = 0;
            for word in line.split_whitespace() {
                let len = word.chars().count();
                if used > 0 && used + 1 + len > width {
                    lines += 1;
                    used = 0;
                }
                if used > 0 {
                    used += 1;
                }
                used += len;
                // Words longer than a line are broken across several
                while used > width {
                    lines += 1;
                    used -= width;
                }
            }
            lines
        })
        .sum::<usize>()
        .max(1)
}

pub fn render(frame: &mut Frame, state: &DialogState) {
    let area = frame.area();

    // Set background color for the entire screen
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND).fg(theme::FOREGROUND)),
        area,
    );

    let width = DIALOG_WIDTH.min(area.width);
    let text_width = usize::from(width.saturating_sub(4).max(1));
    let message_lines =
        u16::try_from(wrapped_line_count(&state.request.message, text_width)).unwrap_or(u16::MAX);
    // Borders, padding, spacer, buttons, help
    let height = message_lines.saturating_add(7).min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", state.request.title))
        .title_alignment(Alignment::Center)
        .padding(Padding::new(1, 1, 1, 0))
        .style(Style::default().fg(theme::CYAN).bg(theme::BACKGROUND));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let layout = Layout::vertical([
        Constraint::Min(1),    // Message
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Buttons
        Constraint::Length(1), // Help
    ])
    .split(inner);

    let message = Paragraph::new(state.request.message.as_str())
        .style(Style::default().fg(theme::FOREGROUND))
        .wrap(Wrap { trim: true });
    frame.render_widget(message, layout[0]);

    let mut spans = Vec::new();
    for button in state.buttons() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.extend(button_spans(state, button));
    }
    let buttons = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(buttons, layout[2]);

    let icons = state.icons;
    let help = Line::from(vec![
        Span::styled(icons.tab_next(), Style::default().fg(theme::FOREGROUND)),
        Span::styled(" switch • ", Style::default().fg(theme::DIMMED)),
        Span::styled(icons.enter(), Style::default().fg(theme::FOREGROUND)),
        Span::styled(" select • ", Style::default().fg(theme::DIMMED)),
        Span::styled("esc", Style::default().fg(theme::FOREGROUND)),
        Span::styled(" cancel", Style::default().fg(theme::DIMMED)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), layout[3]);
}

fn button_spans<'a>(state: &'a DialogState, button: DialogButton) -> Vec<Span<'a>> {
    let color = match button {
        DialogButton::Accept => theme::GREEN,
        DialogButton::Neutral => theme::YELLOW,
        DialogButton::Decline => theme::RED,
    };
    let label = state.label(button);
    if state.selected == button {
        vec![
            Span::styled(state.icons.btn_left(), Style::default().fg(color)),
            Span::styled(label, Style::default().bg(color).fg(theme::BACKGROUND)),
            Span::styled(state.icons.btn_right(), Style::default().fg(color)),
        ]
    } else {
        vec![Span::styled(format!(" {label} "), Style::default().fg(color))]
    }
}
