//! Interactive terminal chart shown after the files are written.

use std::io;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::chart::{PosteriorFigure, X_MAX, Y_MAX};
use crate::report::{format_probability, negative_annotation, positive_annotation};

/// `count` evenly spaced tick labels from 0 to `max`.
fn axis_labels(max: f64, count: usize) -> Vec<String> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| format!("{:.2}", max * i as f64 / last))
        .collect()
}

/// Terminal rendering of a [`PosteriorFigure`].
pub struct PosteriorView<'a> {
    figure: &'a PosteriorFigure<'a>,
    ppv: Vec<(f64, f64)>,
    npv: Vec<(f64, f64)>,
    markers: [(f64, f64); 2],
}

impl<'a> PosteriorView<'a> {
    pub fn new(figure: &'a PosteriorFigure<'a>) -> Self {
        let h = figure.highlight;
        Self {
            figure,
            ppv: figure.curves.ppv_points(),
            npv: figure.curves.npv_points(),
            markers: [(h.prior, h.ppv), (h.prior, h.npv)],
        }
    }

    /// Show the chart until a key is pressed or the mouse is clicked.
    pub fn run(&self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        execute!(io::stdout(), EnableMouseCapture)?;
        let result = self.wait_for_acknowledgement(terminal);
        execute!(io::stdout(), DisableMouseCapture)?;
        result
    }

    fn wait_for_acknowledgement(&self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                self.render(frame, area);
            })?;
            let event = event::read()?;
            if is_acknowledgement(&event) {
                tracing::debug!(?event, "Chart acknowledged");
                return Ok(());
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Chart
                Constraint::Length(4), // Annotations
                Constraint::Length(1), // Hint
            ])
            .split(area);

        self.render_chart(frame, chunks[0]);
        self.render_annotations(frame, chunks[1]);

        let hint = Paragraph::new("Press any key or click to exit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[2]);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let labels = self.figure.labels;
        let datasets = vec![
            Dataset::default()
                .name(labels.ppv_legend())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::White))
                .data(&self.ppv),
            Dataset::default()
                .name(labels.npv_legend())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Gray))
                .data(&self.npv),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&self.markers),
        ];

        let chart = Chart::new(datasets)
            .block(Block::bordered().title(" Predictive value "))
            .x_axis(
                Axis::default()
                    .title(labels.prior_axis())
                    .bounds([0.0, X_MAX])
                    .labels(axis_labels(X_MAX, 5)),
            )
            .y_axis(
                Axis::default()
                    .title("Predictive value")
                    .bounds([0.0, Y_MAX])
                    .labels(axis_labels(Y_MAX, 4)),
            )
            .legend_position(Some(LegendPosition::Right))
            .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)));

        frame.render_widget(chart, area);
    }

    fn render_annotations(&self, frame: &mut Frame, area: Rect) {
        let h = self.figure.highlight;
        let [tp, fp] = positive_annotation(&h);
        let [tn, fn_] = negative_annotation(&h);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("Prior: ", bold),
                Span::styled(format_probability(h.prior), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(format!("{tp}   {fp}")),
            Line::from(format!("{tn}   {fn_}")),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Key presses and mouse clicks dismiss the chart; resizes and the rest redraw.
pub fn is_acknowledgement(event: &Event) -> bool {
    match event {
        Event::Key(key) => key.kind == KeyEventKind::Press,
        Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
        _ => false,
    }
}
