use criterion::{Criterion, black_box, criterion_group, criterion_main};
use textpanel::{Frame, Layout, PanelSpec, Subdivision, Variables, wrap_lines};

const PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
    quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn wrap_paragraph(c: &mut Criterion) {
    c.bench_function("wrap_paragraph", |b| {
        b.iter(|| wrap_lines(black_box(PARAGRAPH), black_box(32)));
    });
}

fn frame_paragraph(c: &mut Criterion) {
    let frame = Frame::new().with_width(40).with_height(12).with_padding(1);
    c.bench_function("frame_paragraph", |b| {
        b.iter(|| frame.apply(black_box(PARAGRAPH)));
    });
}

fn render_dashboard(c: &mut Criterion) {
    let layout = build_dashboard().expect("layout");
    let vars = Variables::new().with("status", "ok").with("load", 0.42);
    c.bench_function("render_dashboard", |b| {
        b.iter(|| layout.render(layout.root(), black_box(&vars)).expect("render"));
    });
}

fn build_dashboard() -> textpanel::Result<Layout> {
    let mut layout = Layout::new(PanelSpec::new("dashboard", 120, 40));
    let root = layout.root();
    let rows = layout.subdivide(
        root,
        Subdivision::vertical(3).with_names(["header", "body", "footer"]),
    )?;
    layout.set_percent(rows[0], Some(10))?;
    layout.set_percent(rows[2], Some(10))?;
    let columns = layout.subdivide(rows[1], Subdivision::horizontal(3))?;
    layout.set_percent(columns[0], Some(20))?;
    for column in columns {
        layout.set_content(column, PARAGRAPH)?;
    }
    layout.assign(root, "header", "status: {{status}}")?;
    layout.assign(root, "footer", "load {{load}}")?;
    Ok(layout)
}

criterion_group!(benches, wrap_paragraph, frame_paragraph, render_dashboard);
criterion_main!(benches);
