use super::*;
use pretty_assertions::assert_eq;

fn recorded() -> (Canvas, RecordingCanvas) {
    let recorder = RecordingCanvas::new();
    (Canvas::new(Box::new(recorder.clone())), recorder)
}

fn rounded((x, y): Point) -> (i64, i64) {
    (x.round() as i64, y.round() as i64)
}

#[test]
fn heading_zero_is_north_and_turns_clockwise() {
    let (mut canvas, _) = recorded();
    canvas.forward(100.0);
    assert_eq!(rounded(canvas.position()), (0, 100));
    canvas.right(90.0);
    canvas.forward(50.0);
    assert_eq!(rounded(canvas.position()), (50, 100));
    canvas.right(-450.0);
    assert_eq!(canvas.heading(), 0.0);
}

#[test]
fn pen_down_moves_draw_lines() {
    let (mut canvas, recorder) = recorded();
    canvas.set_pen_down(false);
    canvas.set_xy(10.0, 0.0);
    canvas.set_pen_down(true);
    canvas.set_pen_color(4);
    canvas.set_xy(10.0, 10.0);
    let lines: Vec<DrawCommand> = recorder
        .commands()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .collect();
    assert_eq!(
        lines,
        vec![DrawCommand::Line {
            from: (10.0, 0.0),
            to: (10.0, 10.0),
            color: 4
        }]
    );
}

#[test]
fn fill_emits_a_polygon() {
    let (mut canvas, recorder) = recorded();
    canvas.begin_fill();
    canvas.set_xy(10.0, 0.0);
    canvas.set_xy(10.0, 10.0);
    canvas.end_fill(2);
    let polygons = recorder
        .commands()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
        .count();
    assert_eq!(polygons, 1);
    assert!(canvas.to_svg().contains("<polygon"));
}

#[test]
fn clear_screen_resets_pose_and_picture() {
    let (mut canvas, _) = recorded();
    canvas.forward(10.0);
    canvas.label("hi <there>");
    assert!(canvas.to_svg().contains("hi &lt;there&gt;"));
    canvas.clear_screen();
    assert_eq!(canvas.position(), (0.0, 0.0));
    assert!(!canvas.to_svg().contains("<line"));
}

#[test]
fn colours_wrap_around_the_palette() {
    let (mut canvas, _) = recorded();
    canvas.set_background(17);
    assert_eq!(canvas.background(), 1);
    assert_eq!(rgb(4), "#ff0000");
}
