use approx::assert_relative_eq;
use hand_write::{
    Capabilities, DrawConfig, Error, ExportedImage, HandWrite, Mode, Point, RasterSurface,
    RawInput, Size,
};

const RED: [u8; 4] = [255, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn config(json: &str) -> DrawConfig {
    DrawConfig::from_json(json).unwrap()
}

fn widget(config: DrawConfig) -> HandWrite<RasterSurface> {
    HandWrite::new(
        RasterSurface::new(Size::new(120.0, 80.0)),
        config,
        Capabilities::default(),
    )
    .unwrap()
}

fn stroke(w: &mut HandWrite<RasterSurface>, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    w.pointer_start(&RawInput::mouse(first.0, first.1));
    if let Some((last, moves)) = rest.split_last() {
        for &(x, y) in moves {
            w.pointer_move(RawInput::mouse(x, y));
            w.on_frame();
        }
        w.pointer_end(&RawInput::mouse(last.0, last.1));
    } else {
        w.pointer_end(&RawInput::mouse(first.0, first.1));
    }
}

fn pixel(w: &HandWrite<RasterSurface>, x: f64, y: f64) -> [u8; 4] {
    w.surface().pixel_at(Point::new(x, y)).unwrap()
}

#[test]
fn clear_matches_fresh_widget_export() {
    let cfg = config(r##"{"backgroundColor":"#fff","paintColor":"#f00"}"##);
    let fresh = widget(cfg.clone()).export_image("png").unwrap();

    let mut w = widget(cfg);
    stroke(&mut w, &[(10.0, 10.0), (40.0, 30.0), (90.0, 20.0)]);
    assert_ne!(w.export_image("png").unwrap(), fresh);

    w.clear();
    assert_eq!(w.export_image("png").unwrap(), fresh);
    assert_eq!(pixel(&w, 40.0, 30.0), WHITE);
}

#[test]
fn jpg_and_jpeg_tokens_export_the_same_image() {
    let mut w = widget(config(r#"{"backgroundColor":"white"}"#));
    stroke(&mut w, &[(5.0, 5.0), (60.0, 40.0)]);
    let a = w.export("jpg").unwrap();
    let b = w.export("JPEG").unwrap();
    assert_eq!(a.format.mime_type(), "image/jpeg");
    assert_eq!(a, b);
}

#[test]
fn tiff_is_unsupported() {
    let w = widget(DrawConfig::default());
    assert!(matches!(w.export_image("tiff"), Err(Error::UnsupportedFormat(_))));
    assert!(matches!(w.export_data_url("tiff"), Err(Error::UnsupportedFormat(_))));
}

#[test]
fn data_url_uses_normalized_mime() {
    let w = widget(DrawConfig::default());
    assert!(w.export_data_url("Png").unwrap().starts_with("data:image/png;base64,"));
}

#[test]
fn linear_mode_draws_constant_width_l_shape() {
    let mut w = widget(config(r#"{"mode":"linear","minWidth":4,"maxWidth":4}"#));
    stroke(&mut w, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    // Horizontal leg along y = 0.5, vertical leg along x = 10.5, each 4px wide.
    assert_eq!(pixel(&w, 5.0, 1.0), RED);
    assert_eq!(pixel(&w, 5.0, 4.0), [0, 0, 0, 0]);
    assert_eq!(pixel(&w, 10.0, 6.0), RED);
    assert_eq!(pixel(&w, 13.0, 6.0), [0, 0, 0, 0]);
    assert_eq!(pixel(&w, 3.0, 8.0), [0, 0, 0, 0]);
}

#[test]
fn fast_handwriting_stroke_is_thin() {
    let mut w = widget(config(
        r#"{"mode":"handwriting","minWidth":5,"maxWidth":15,"writeSpeed":30}"#,
    ));
    w.pointer_start(&RawInput::mouse(0.0, 40.0));
    w.pointer_move(RawInput::mouse(40.0, 40.0));
    w.on_frame();
    assert_relative_eq!(w.stroke_state().last_radius, 2.5);
    w.pointer_move(RawInput::mouse(80.0, 40.0));
    w.on_frame();
    assert_relative_eq!(w.stroke_state().last_radius, 2.5);
    // Thin: nothing painted 4px off the stroke axis at the end of the second segment.
    assert_eq!(pixel(&w, 78.0, 44.5), [0, 0, 0, 0]);
    assert_eq!(pixel(&w, 78.0, 40.0), RED);
}

#[test]
fn slow_handwriting_stroke_is_thick() {
    let mut w = widget(config(r#"{"minWidth":2,"maxWidth":20,"writeSpeed":100}"#));
    stroke(
        &mut w,
        &[(10.0, 40.0), (13.0, 40.0), (16.0, 40.0), (19.0, 40.0), (22.0, 40.0)],
    );
    assert!(w.stroke_state().last_point.is_none());
    assert_eq!(pixel(&w, 16.0, 45.0), RED);
}

#[test]
fn single_tap_leaves_a_dot() {
    let mut w = widget(DrawConfig::default());
    stroke(&mut w, &[(30.0, 30.0)]);
    assert_eq!(pixel(&w, 30.0, 30.0), RED);
}

#[test]
fn instances_do_not_share_stroke_state() {
    let mut a = widget(DrawConfig::default());
    let b = widget(DrawConfig::default());
    a.pointer_start(&RawInput::mouse(10.0, 10.0));
    a.pointer_move(RawInput::mouse(50.0, 10.0));
    a.on_frame();
    assert!(a.is_drawing());
    assert!(!b.is_drawing());
    assert_eq!(b.stroke_state().last_radius, 0.0);
    assert_ne!(a.export_image("png").unwrap(), b.export_image("png").unwrap());
}

#[test]
fn mode_switch_keeps_existing_pixels() {
    let mut w = widget(DrawConfig::default());
    stroke(&mut w, &[(10.0, 10.0), (40.0, 10.0)]);
    let before = pixel(&w, 20.0, 10.0);
    w.set_mode(Mode::Linear);
    assert_eq!(pixel(&w, 20.0, 10.0), before);
    assert_eq!(w.mode(), Mode::Linear);
}

#[test]
fn resize_scales_backing_store() {
    let mut w = widget(DrawConfig::default());
    w.resize(Size::new(50.0, 25.0), 2.0);
    let png = w.export_image("png").unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 50));
}

#[test]
fn canvas_offset_is_subtracted() {
    let mut w = HandWrite::new(
        RasterSurface::new(Size::new(60.0, 60.0)).with_origin(100.0, 200.0),
        DrawConfig::default(),
        Capabilities::default(),
    )
    .unwrap();
    w.pointer_start(&RawInput::mouse(130.0, 230.0));
    assert_eq!(w.stroke_state().last_point, Some(Point::new(30.5, 30.5)));
}

#[test]
fn download_sink_receives_named_file() {
    let w = widget(DrawConfig::default());
    let mut sink: Vec<ExportedImage> = Vec::new();
    w.trigger_download("gif", &mut sink).unwrap();
    assert_eq!(sink[0].file_name(), "handwrite.gif");
    assert_eq!(&sink[0].bytes[..3], b"GIF");
}
