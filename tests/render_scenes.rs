//! End-to-end scenes: build a document, render it, inspect pixels.

use glam::dvec2;
use miette::Diagnostic;
use sceneraster::render::Placed;
use sceneraster::{
    Canvas, ComposedGroups, DocumentBuilder, Geometry, Paint, Rect, RenderOptions, Renderer, Rgb,
    Style, TransformChain, render,
};

const RED: Rgb = Rgb::new(255, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ascii(canvas: &Canvas) -> String {
    canvas.to_ascii(|p| match p {
        Rgb::WHITE => '.',
        Rgb::BLACK => '#',
        RED => 'r',
        BLUE => 'b',
        _ => '?',
    })
}

#[test]
fn red_circle_in_the_middle() {
    init_tracing();
    let mut doc = DocumentBuilder::new(100.0, 100.0);
    doc.circle(50.0, 50.0, 20.0).style.fill = Paint::parse("red");
    let canvas = render(&doc.build(), 100, 100).unwrap();

    assert_eq!(canvas.pixel(50, 50), Some(RED));
    assert_eq!(canvas.pixel(70, 50), Some(RED));
    assert_eq!(canvas.pixel(71, 50), Some(Rgb::WHITE));
    assert_eq!(canvas.pixel(0, 0), Some(Rgb::WHITE));
}

#[test]
fn ungrouped_shapes_use_literal_coordinates() {
    let mut doc = DocumentBuilder::new(30.0, 30.0);
    doc.rect(5.0, 7.0, 3.0, 2.0);
    let canvas = render(&doc.build(), 0, 0).unwrap();

    assert_eq!(canvas.count(Rgb::BLACK), 6);
    for (x, y) in [(5, 7), (7, 7), (5, 8), (7, 8)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgb::BLACK), "({x}, {y})");
    }
    assert_eq!(canvas.pixel(8, 7), Some(Rgb::WHITE));
    assert_eq!(canvas.pixel(5, 9), Some(Rgb::WHITE));
}

#[test]
fn horizontal_line_paints_eleven_pixels() {
    let mut doc = DocumentBuilder::new(20.0, 20.0);
    doc.line(0.0, 0.0, 10.0, 0.0);
    let canvas = render(&doc.build(), 20, 20).unwrap();

    assert_eq!(canvas.count(Rgb::BLACK), 11);
    assert!((0..=10).all(|x| canvas.pixel(x, 0) == Some(Rgb::BLACK)));
    assert_eq!(canvas.pixel(11, 0), Some(Rgb::WHITE));
}

#[test]
fn rect_in_rotated_group_covers_rotated_corners() {
    let mut doc = DocumentBuilder::new(60.0, 40.0);
    doc.begin_group(TransformChain::parse("rotate(90)"));
    doc.rect(10.0, 10.0, 20.0, 20.0);
    doc.end_group().unwrap();
    let doc = doc.build();

    let shape = &doc.shapes()[0];
    let placement = shape.placement(&ComposedGroups::new(doc.groups()));
    let Some(Placed::Rect(bounds)) = shape.geometry.place(&placement) else {
        panic!("rect should place");
    };
    assert!((bounds.min - dvec2(-30.0, 10.0)).abs().max_element() < 1e-9, "{bounds:?}");
    assert!((bounds.max - dvec2(-10.0, 30.0)).abs().max_element() < 1e-9, "{bounds:?}");

    // Entirely left of the canvas.
    let canvas = render(&doc, 0, 0).unwrap();
    assert_eq!(canvas.count(Rgb::WHITE), 60 * 40);
}

#[test]
fn rotated_rect_brought_back_on_canvas() {
    let mut doc = DocumentBuilder::new(60.0, 40.0);
    doc.begin_group(TransformChain::parse("translate(40, 0)"));
    doc.begin_group(TransformChain::parse("rotate(90)"));
    doc.rect(10.0, 10.0, 20.0, 20.0);
    doc.end_group().unwrap();
    doc.end_group().unwrap();
    let canvas = render(&doc.build(), 0, 0).unwrap();

    for (x, y) in [(11, 11), (15, 25), (28, 28)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgb::BLACK), "({x}, {y})");
    }
    for (x, y) in [(5, 20), (35, 20), (20, 5), (20, 35)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgb::WHITE), "({x}, {y})");
    }
}

#[test]
fn private_chain_applies_inside_group_chain() {
    let mut doc = DocumentBuilder::new(20.0, 20.0);
    doc.begin_group(TransformChain::parse("translate(6, 1)"));
    doc.add(
        sceneraster::Line { x1: 0.0, y1: 0.0, x2: 4.0, y2: 0.0 },
        None,
        TransformChain::parse("rotate(90)"),
    );
    doc.end_group().unwrap();
    let canvas = render(&doc.build(), 0, 0).unwrap();

    assert_eq!(canvas.count(Rgb::BLACK), 5);
    assert!((1..=5).all(|y| canvas.pixel(6, y) == Some(Rgb::BLACK)));
}

#[test]
fn circle_radius_grows_with_group_scale() {
    let mut doc = DocumentBuilder::new(20.0, 20.0);
    doc.begin_group(TransformChain::parse("scale(2)"));
    doc.circle(5.0, 5.0, 2.0);
    doc.end_group().unwrap();
    let canvas = render(&doc.build(), 0, 0).unwrap();

    assert_eq!(canvas.pixel(10, 10), Some(Rgb::BLACK));
    assert_eq!(canvas.pixel(14, 10), Some(Rgb::BLACK));
    assert_eq!(canvas.pixel(15, 10), Some(Rgb::WHITE));
    assert_eq!(canvas.pixel(10, 6), Some(Rgb::BLACK));
    assert_eq!(canvas.pixel(10, 5), Some(Rgb::WHITE));
}

#[test]
fn later_shapes_paint_over_earlier_ones() {
    let mut doc = DocumentBuilder::new(10.0, 10.0);
    doc.rect(0.0, 0.0, 10.0, 10.0).style.fill = Paint::from(RED);
    doc.circle(5.0, 5.0, 2.0).style.fill = Paint::from(BLUE);
    let canvas = render(&doc.build(), 0, 0).unwrap();

    assert_eq!(canvas.pixel(5, 5), Some(BLUE));
    assert_eq!(canvas.pixel(0, 0), Some(RED));
    assert_eq!(canvas.count(BLUE), 13);
    assert_eq!(canvas.count(RED), 100 - 13);
}

#[test]
fn opacity_blends_toward_white() {
    let mut doc = DocumentBuilder::new(10.0, 1.0);
    doc.rect(0.0, 0.0, 2.0, 1.0).style.opacity = 1.0;
    doc.rect(2.0, 0.0, 2.0, 1.0).style.opacity = 0.5;
    doc.rect(4.0, 0.0, 2.0, 1.0).style.opacity = 0.0;
    doc.rect(6.0, 0.0, 2.0, 1.0).style = Style::default().with_fill("#ff0000").with_opacity(0.25);
    let canvas = render(&doc.build(), 0, 0).unwrap();

    assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
    assert_eq!(canvas.pixel(2, 0), Some(Rgb::new(127, 127, 127)));
    assert_eq!(canvas.pixel(4, 0), Some(Rgb::WHITE));
    assert_eq!(canvas.pixel(6, 0), Some(Rgb::new(255, 191, 191)));
}

#[test]
fn viewport_scales_to_target_size() {
    let mut doc = DocumentBuilder::new(50.0, 50.0);
    doc.rect(10.0, 10.0, 10.0, 10.0);
    let doc = doc.build();

    let native = render(&doc, 0, 0).unwrap();
    assert_eq!((native.width(), native.height()), (50, 50));
    assert_eq!(native.count(Rgb::BLACK), 100);

    let doubled = render(&doc, 100, 100).unwrap();
    assert_eq!(doubled.count(Rgb::BLACK), 400);
    assert_eq!(doubled.pixel(20, 20), Some(Rgb::BLACK));
    assert_eq!(doubled.pixel(39, 39), Some(Rgb::BLACK));
    assert_eq!(doubled.pixel(40, 40), Some(Rgb::WHITE));
}

#[test]
fn unsized_document_gets_default_canvas() {
    let doc = DocumentBuilder::new(0.0, 0.0).build();
    let canvas = render(&doc, 0, 0).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (500, 300));
    assert_eq!(canvas.as_bytes().len(), 500 * 300 * 3);

    let custom = Renderer::new(RenderOptions::default().with_default_size(8, 4));
    let canvas = custom.render(&doc, 0, 0).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (8, 4));
}

#[test]
fn rounded_rect_leaves_corners_unpainted() {
    let mut doc = DocumentBuilder::new(40.0, 40.0);
    doc.rounded_rect(10.0, 10.0, 20.0, 20.0, 5.0, 5.0);
    let canvas = render(&doc.build(), 0, 0).unwrap();

    for (x, y) in [(10, 10), (29, 10), (10, 29), (29, 29)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgb::WHITE), "corner ({x}, {y})");
    }
    for (x, y) in [(20, 20), (10, 20), (20, 10), (29, 20), (20, 29)] {
        assert_eq!(canvas.pixel(x, y), Some(Rgb::BLACK), "edge ({x}, {y})");
    }
}

#[test]
fn degenerate_shapes_paint_nothing() {
    let mut doc = DocumentBuilder::new(10.0, 10.0);
    doc.circle(5.0, 5.0, -1.0);
    doc.rect(1.0, 1.0, f64::NAN, 3.0);
    doc.rect(1.0, 1.0, 3.0, 3.0).style = Style::default().with_fill("none").with_stroke("red", -2.0);
    doc.line(0.0, 0.0, f64::INFINITY, 3.0);
    let canvas = render(&doc.build(), 0, 0).unwrap();
    assert_eq!(canvas.count(Rgb::WHITE), 100);
}

#[test]
fn line_crossing_the_edge_does_not_depend_on_canvas_size() {
    let scene = |size: f64| {
        let mut doc = DocumentBuilder::new(size, size);
        doc.line(3.0, -50.0, 6.0, 50.0);
        doc.line(-100.0, 2.0, 100.0, 7.0).style.stroke = Paint::parse("red");
        render(&doc.build(), 0, 0).unwrap()
    };
    let small = scene(10.0);
    let large = scene(40.0);

    insta::assert_snapshot!(ascii(&small), @r"
    ....#.....
    .....#....
    .....#....
    .....#....
    r....#....
    .rrrrrrrrr
    .....#....
    .....#....
    .....#....
    .....#....
    ");
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(small.pixel(x, y), large.pixel(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn small_scene_snapshot() {
    let mut doc = DocumentBuilder::new(12.0, 8.0);
    doc.rect(1.0, 1.0, 5.0, 4.0).style = Style::default().with_fill("red").with_stroke("black", 1.0);
    doc.line(7.0, 0.0, 11.0, 4.0).style.stroke = Paint::parse("blue");
    doc.circle(9.0, 6.0, 1.0);
    let canvas = render(&doc.build(), 0, 0).unwrap();

    insta::assert_snapshot!(ascii(&canvas), @r"
    .......b....
    .#####..b...
    .#rrr#...b..
    .#rrr#....b.
    .#####.....b
    .........#..
    ........###.
    .........#..
    ");
}

#[test]
fn rendering_is_deterministic_and_leaves_the_document_alone() {
    let mut doc = DocumentBuilder::new(32.0, 32.0);
    doc.begin_group(TransformChain::parse("translate(16 16) rotate(30)"));
    doc.rect(-8.0, -4.0, 16.0, 8.0).style.stroke = Paint::parse("#0000ff");
    doc.circle(0.0, 0.0, 3.0).style.fill = Paint::parse("rgb(255, 0, 0)");
    doc.end_group().unwrap();
    let doc = doc.build();
    let before = doc.to_string();

    let a = render(&doc, 0, 0).unwrap();
    let b = render(&doc, 0, 0).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(doc.to_string(), before);
}

#[test]
fn strict_transform_parsing_reports_codes() {
    let err = TransformChain::try_parse("rotate(90) bogus(1)").unwrap_err();
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("sceneraster::transform::unknown_function")
    );

    let err = TransformChain::try_parse("matrix(1 2 3)").unwrap_err();
    assert_eq!(err.to_string(), "matrix() takes 6 arguments, got 3");

    // The lenient parser keeps what it understands.
    assert_eq!(TransformChain::parse("rotate(90) bogus(1)").ops().len(), 1);
}

#[test]
fn shape_kinds_dispatch() {
    let rect = Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
    assert_eq!(rect.kind(), "rect");
}
