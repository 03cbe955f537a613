use std::fs;
use std::path::Path;

use checkerboard_matte::{
    dark_background::brightness_alpha, default_jobs, Error, Job, MattingConfig, MattingEngine,
    Pipeline,
};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

const LIGHT: u8 = 204;
const DARK: u8 = 153;
const CYAN: [u8; 3] = [0, 255, 255];

/// Grey checkerboard with `tile`-pixel squares and a solid cyan square of
/// side `square` centred on it.
fn checkerboard_with_cyan_square(size: u32, tile: u32, square: u32) -> RgbaImage {
    let start = (size - square) / 2;
    let end = start + square;
    RgbaImage::from_fn(size, size, |x, y| {
        if (start..end).contains(&x) && (start..end).contains(&y) {
            Rgba([CYAN[0], CYAN[1], CYAN[2], 255])
        } else {
            let v = if ((x / tile) + (y / tile)) % 2 == 0 {
                LIGHT
            } else {
                DARK
            };
            Rgba([v, v, v, 255])
        }
    })
}

#[test]
fn checkerboard_scenario_recovers_cyan_square() {
    let img = checkerboard_with_cyan_square(96, 17, 32);
    let out = Pipeline::Checkerboard
        .apply(&img, &MattingConfig::default())
        .unwrap();
    assert_eq!(out.dimensions(), img.dimensions());

    // Square spans 32..64; the core is clear of median and blur fringes.
    for y in 44..52 {
        for x in 44..52 {
            let p = out.get_pixel(x, y);
            assert!(p[3] >= 250, "alpha at ({x},{y}) = {}", p[3]);
            for ch in 0..3 {
                let diff = (i32::from(p[ch]) - i32::from(CYAN[ch])).abs();
                assert!(diff <= 2, "channel {ch} at ({x},{y}) = {}", p[ch]);
            }
        }
    }

    // Every pixel more than 20px away from the square is fully transparent.
    for (x, y, p) in out.enumerate_pixels() {
        if x < 12 || x >= 84 || y < 12 || y >= 84 {
            assert_eq!(p[3], 0, "alpha at ({x},{y})");
        }
    }
}

#[test]
fn checkerboard_cyan_pixels_keep_exact_colour() {
    let img = checkerboard_with_cyan_square(80, 17, 30);
    let out = Pipeline::Checkerboard
        .apply(&img, &MattingConfig::default())
        .unwrap();
    for (src, dst) in img.pixels().zip(out.pixels()) {
        if src.0[..3] == CYAN {
            assert_eq!(dst.0[..3], CYAN);
        }
    }
}

#[test]
fn pure_checkerboard_is_fully_transparent() {
    let img = RgbaImage::from_fn(60, 45, |x, y| {
        let v = if ((x / 15) + (y / 15)) % 2 == 0 {
            LIGHT
        } else {
            DARK
        };
        Rgba([v, v, v, 255])
    });
    let out = Pipeline::Checkerboard
        .apply(&img, &MattingConfig::default())
        .unwrap();
    assert_eq!(out.dimensions(), (60, 45));
    assert!(out.pixels().all(|p| p[3] == 0));
}

#[test]
fn dark_scenario_scales_alpha_by_brightness() {
    // max channel 13 gives value 0.051, just above the nominal 0.05
    let img = RgbaImage::from_pixel(20, 20, Rgba([13, 9, 11, 255]));
    let out = Pipeline::DarkBackground
        .apply(&img, &MattingConfig::default())
        .unwrap();
    assert_eq!(out.dimensions(), (20, 20));

    let expected = brightness_alpha(13.0 / 255.0, 0.12);
    assert_eq!(expected, 108);
    assert!((i32::from(expected) - 106).abs() <= 3);
    for p in out.pixels() {
        assert_eq!(p[3], expected);
        assert_eq!(p.0[..3], [13, 9, 11]);
    }
}

#[test]
fn dark_scenario_keeps_bright_pixels_unreduced() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    img.put_pixel(1, 1, Rgba([31, 10, 60, 200]));
    let out = Pipeline::DarkBackground
        .apply(&img, &MattingConfig::default())
        .unwrap();
    assert_eq!(out.get_pixel(1, 1)[3], 200);
    assert_eq!(out.get_pixel(0, 0)[3], 0);
}

fn write_sources(dir: &Path) {
    checkerboard_with_cyan_square(64, 17, 30)
        .save(dir.join("board.png"))
        .unwrap();
    let dark = RgbImage::from_fn(32, 24, |x, _| {
        if x < 16 {
            Rgb([8, 10, 20])
        } else {
            Rgb([40, 160, 220])
        }
    });
    DynamicImage::ImageRgb8(dark)
        .save(dir.join("backdrop.jpeg"))
        .unwrap();
}

fn test_jobs() -> Vec<Job> {
    vec![
        Job::checkerboard("board.png", "board-matte.png"),
        Job::checkerboard("missing.png", "missing-matte.png"),
        Job::dark_background("backdrop.jpeg", "backdrop-matte.png"),
    ]
}

#[test]
fn batch_processes_jobs_and_skips_missing_sources() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sources(input.path());
    let out_dir = output.path().join("nested").join("out");

    let engine = MattingEngine::default();
    let results = engine
        .process_batch(input.path(), &out_dir, &test_jobs())
        .unwrap();

    assert_eq!(results.len(), 3);
    assert!(!results[0].skipped);
    assert_eq!(results[0].dimensions, Some((64, 64)));
    assert!(results[1].skipped);
    assert!(!out_dir.join("missing-matte.png").exists());
    assert_eq!(results[2].pipeline, Pipeline::DarkBackground);
    assert_eq!(results[2].dimensions, Some((32, 24)));

    let board = image::open(out_dir.join("board-matte.png")).unwrap();
    assert!(matches!(board, DynamicImage::ImageRgba8(_)));
    assert_eq!(board.to_rgba8().dimensions(), (64, 64));

    let backdrop = image::open(out_dir.join("backdrop-matte.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(backdrop.dimensions(), (32, 24));
    assert!(backdrop.get_pixel(2, 12)[3] < 255);
    assert_eq!(backdrop.get_pixel(28, 12)[3], 255);
}

#[test]
fn batch_runs_are_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_sources(input.path());
    let first = output.path().join("first");
    let second = output.path().join("second");

    let engine = MattingEngine::default();
    engine
        .process_batch(input.path(), &first, &test_jobs())
        .unwrap();
    engine
        .process_batch(input.path(), &second, &test_jobs())
        .unwrap();

    for name in ["board-matte.png", "backdrop-matte.png"] {
        let a = fs::read(first.join(name)).unwrap();
        let b = fs::read(second.join(name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn undecodable_source_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("broken.png"), b"definitely not a png").unwrap();

    let engine = MattingEngine::default();
    let jobs = vec![
        Job::checkerboard("broken.png", "broken-matte.png"),
        Job::checkerboard("never-reached.png", "never.png"),
    ];
    let err = engine
        .process_batch(input.path(), output.path(), &jobs)
        .unwrap_err();
    match err {
        Error::Decode { path, .. } => assert!(path.ends_with("broken.png")),
        other => panic!("expected decode error, got {other:?}"),
    }
    assert!(!output.path().join("broken-matte.png").exists());
}

#[test]
fn default_jobs_against_empty_directory_skip_everything() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("what-we-do");

    let results = MattingEngine::default()
        .process_batch(input.path(), &out_dir, &default_jobs())
        .unwrap();
    assert_eq!(results.len(), 9);
    assert!(results.iter().all(|r| r.skipped));
    assert!(out_dir.is_dir());
}

#[test]
fn engine_with_custom_config_changes_threshold() {
    let mut config = MattingConfig::default();
    config.dark_background.value_threshold = 0.5;
    let engine = MattingEngine::new(config).unwrap();

    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([51, 0, 0, 255])));
    let out = engine.process_image(&img, Pipeline::DarkBackground).unwrap();
    // 0.2 / 0.5 * 255 = 102
    assert!(out.pixels().all(|p| p[3] == 102));
}

#[test]
fn missing_input_directory_skips_every_job() {
    let output = tempfile::tempdir().unwrap();
    let input = output.path().join("no-such-input");
    let out_dir = output.path().join("what-we-do");

    let results = MattingEngine::default()
        .process_batch(&input, &out_dir, &default_jobs())
        .unwrap();
    assert_eq!(results.len(), 9);
    assert!(results.iter().all(|r| r.skipped));
    assert!(out_dir.is_dir());
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn source_with_unrecognised_extension_is_decoded_by_content() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    checkerboard_with_cyan_square(64, 17, 30)
        .save_with_format(input.path().join("board.dat"), image::ImageFormat::Png)
        .unwrap();

    let engine = MattingEngine::default();
    let jobs = vec![Job::checkerboard("board.dat", "board-matte.png")];
    let results = engine
        .process_batch(input.path(), output.path(), &jobs)
        .unwrap();
    assert!(!results[0].skipped);
    assert_eq!(results[0].dimensions, Some((64, 64)));
    assert!(output.path().join("board-matte.png").exists());
}

#[test]
fn engine_exposes_its_constants() {
    let mut config = MattingConfig::default();
    config.checkerboard.median_size = 21;
    let engine = MattingEngine::new(config.clone()).unwrap();
    assert_eq!(engine.config(), &config);
    assert_eq!(engine.config().checkerboard.median_radius(), 10);
}
