use glint_image::{alpha_composite, ImageBatch, ImageError, TensorLayout};
use glint_node::{overlay_batch, NodeError, NodeRegistry, TextOverlayNode, TextOverlayParams};
use glint_text::{blend_coverage, TextError, TextExtent, TextPainter};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

/// Paints every non-space character as a solid `advance` x `line_height` block
struct BlockPainter {
    advance: u32,
    line_height: u32,
}

impl BlockPainter {
    fn new() -> Self {
        Self {
            advance: 10,
            line_height: 8,
        }
    }
}

impl TextPainter for BlockPainter {
    fn measure(&mut self, text: &str) -> glint_text::Result<TextExtent> {
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Ok(TextExtent {
            width: widest as u32 * self.advance,
            height: lines.len() as u32 * self.line_height,
        })
    }

    fn paint(
        &mut self,
        layer: &mut RgbaImage,
        origin: (i32, i32),
        text: &str,
        ink: [u8; 4],
    ) -> glint_text::Result<()> {
        for (row, line) in text.split('\n').enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let left = origin.0 + (col as u32 * self.advance) as i32;
                let top = origin.1 + (row as u32 * self.line_height) as i32;
                for y in top..top + self.line_height as i32 {
                    for x in left..left + self.advance as i32 {
                        if x >= 0 && y >= 0 && (x as u32) < layer.width() && (y as u32) < layer.height()
                        {
                            blend_coverage(layer.get_pixel_mut(x as u32, y as u32), ink, 255);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

const GRAY: Rgb<u8> = Rgb([40, 40, 40]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

fn gray_batch(layout: TensorLayout, count: usize, width: u32, height: u32) -> ImageBatch {
    let rasters = vec![RgbImage::from_pixel(width, height, GRAY); count];
    ImageBatch::from_rasters(layout, &rasters).unwrap()
}

fn params(text: &str) -> TextOverlayParams {
    TextOverlayParams {
        text: text.to_string(),
        ..Default::default()
    }
}

fn first_raster(batch: &ImageBatch) -> RgbImage {
    batch.to_rasters().unwrap().remove(0)
}

#[test]
fn batch_shape_is_preserved() {
    for layout in [TensorLayout::ChannelsLast, TensorLayout::ChannelsFirst] {
        let batch = gray_batch(layout, 3, 64, 48);
        let out = overlay_batch(&batch, &params("hi"), &mut BlockPainter::new()).unwrap();

        assert_eq!(out.shape(), batch.shape());
        assert_eq!(out.layout(), layout);
        assert_eq!(out.data().len(), batch.data().len());
    }
}

#[test]
fn origin_request_centers_text_above_bottom() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 100, 80);
    let out = overlay_batch(&batch, &params("ab"), &mut BlockPainter::new()).unwrap();
    let image = first_raster(&out);

    // 20px wide text: x = (100 - 20) / 2 = 40, y = 80 - 50 = 30
    assert_eq!(*image.get_pixel(40, 30), WHITE);
    assert_eq!(*image.get_pixel(59, 37), WHITE);
    assert_eq!(*image.get_pixel(39, 30), GRAY);
    assert_eq!(*image.get_pixel(60, 30), GRAY);
    assert_eq!(*image.get_pixel(40, 29), GRAY);
    assert_eq!(*image.get_pixel(40, 38), GRAY);
}

#[test]
fn explicit_position_is_used() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 100, 80);
    let request = TextOverlayParams {
        x: 5,
        y: 7,
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    assert_eq!(*image.get_pixel(5, 7), WHITE);
    assert_eq!(*image.get_pixel(14, 14), WHITE);
    assert_eq!(*image.get_pixel(15, 7), GRAY);
    assert_eq!(*image.get_pixel(4, 7), GRAY);
}

#[test]
fn zero_opacity_leaves_image_untouched() {
    let mut raster = RgbImage::new(64, 64);
    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8]);
    }
    let batch = ImageBatch::from_rasters(TensorLayout::ChannelsLast, &[raster]).unwrap();

    let request = TextOverlayParams {
        opacity: 0.0,
        ..params("invisible")
    };
    let out = overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap();

    assert_eq!(out, batch);
}

#[test]
fn half_opacity_blends_with_image() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 40, 40);
    let request = TextOverlayParams {
        x: 1,
        y: 1,
        opacity: 0.5,
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    // alpha 127: (255 * 127 + 40 * 128 + 127) / 255 = 147
    assert_eq!(*image.get_pixel(2, 2), Rgb([147, 147, 147]));
}

#[test]
fn shadow_is_drawn_under_text() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 60, 60);
    let request = TextOverlayParams {
        x: 10,
        y: 10,
        font_shadow_x: 2,
        font_shadow_y: 3,
        shadow_color: "255,0,0".to_string(),
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    // Text covers layer rows 0..8, shadow rows 3..11
    assert_eq!(*image.get_pixel(15, 15), WHITE);
    assert_eq!(*image.get_pixel(15, 19), RED);
    assert_eq!(*image.get_pixel(15, 21), GRAY);
}

#[test]
fn shadow_needs_both_offsets() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 60, 60);
    let request = TextOverlayParams {
        x: 10,
        y: 10,
        font_shadow_x: 0,
        font_shadow_y: 3,
        shadow_color: "255,0,0".to_string(),
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    assert_eq!(*image.get_pixel(15, 19), GRAY);
}

#[test]
fn transparent_text_cuts_through_its_shadow() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 60, 60);
    let request = TextOverlayParams {
        x: 10,
        y: 10,
        opacity: 0.0,
        font_shadow_x: 2,
        font_shadow_y: 3,
        shadow_color: "#ff0000".to_string(),
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    assert_eq!(*image.get_pixel(15, 15), GRAY);
    assert_eq!(*image.get_pixel(15, 19), RED);
}

#[test]
fn rotation_turns_layer_counter_clockwise() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 80, 80);
    let request = TextOverlayParams {
        x: 10,
        y: 10,
        rotation: 90,
        ..params("a")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    // The 10x38 layer becomes 38x10; the 10x8 block lands in its left 8 columns
    assert_eq!(*image.get_pixel(13, 15), WHITE);
    assert_eq!(*image.get_pixel(17, 19), WHITE);
    assert_eq!(*image.get_pixel(18, 15), GRAY);
    assert_eq!(*image.get_pixel(30, 15), GRAY);
}

#[test]
fn multiline_text_stacks_lines() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 80, 80);
    let request = TextOverlayParams {
        x: 10,
        y: 10,
        ..params("a\n b")
    };
    let image = first_raster(&overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap());

    assert_eq!(*image.get_pixel(12, 12), WHITE);
    assert_eq!(*image.get_pixel(12, 20), GRAY);
    assert_eq!(*image.get_pixel(22, 20), WHITE);
}

#[test]
fn empty_batch_round_trips() {
    let batch = ImageBatch::new([0, 32, 32, 3], TensorLayout::ChannelsLast, Vec::new()).unwrap();
    let out = overlay_batch(&batch, &params("x"), &mut BlockPainter::new()).unwrap();
    assert_eq!(out, batch);
}

#[test]
fn invalid_color_aborts() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 2, 16, 16);
    let request = TextOverlayParams {
        font_color: "notacolor".to_string(),
        ..params("x")
    };
    let err = overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap_err();
    assert!(matches!(err, NodeError::Color(_)));
}

#[test]
fn out_of_range_parameter_aborts() {
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 16, 16);
    let request = TextOverlayParams {
        rotation: 361,
        ..params("x")
    };
    let err = overlay_batch(&batch, &request, &mut BlockPainter::new()).unwrap_err();
    assert!(matches!(err, NodeError::OutOfRange { name: "rotation", .. }));
}

#[test]
fn non_rgb_tensor_aborts() {
    let batch = ImageBatch::new([1, 2, 2, 4], TensorLayout::ChannelsLast, vec![0.5; 16]).unwrap();
    let err = overlay_batch(&batch, &params("x"), &mut BlockPainter::new()).unwrap_err();
    assert!(matches!(err, NodeError::Image(ImageError::UnsupportedChannels(4))));
}

#[test]
fn add_text_reports_missing_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let node = TextOverlayNode::new(dir.path());
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 16, 16);

    let custom = TextOverlayParams {
        font_family: "Custom".to_string(),
        custom_font_path: Some(dir.path().join("nope.ttf").display().to_string()),
        ..params("x")
    };
    assert!(matches!(
        node.add_text(&batch, &custom),
        Err(NodeError::Text(TextError::CustomFontNotFound(_)))
    ));

    let unknown = TextOverlayParams {
        font_family: "Unknown".to_string(),
        ..params("x")
    };
    assert!(matches!(
        node.add_text(&batch, &unknown),
        Err(NodeError::Text(TextError::FontNotFound(_)))
    ));
}

#[test]
fn add_text_rejects_unparsable_font() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Broken.ttf"), b"garbage").unwrap();
    let node = TextOverlayNode::new(dir.path());
    let batch = gray_batch(TensorLayout::ChannelsLast, 1, 16, 16);

    let request = TextOverlayParams {
        font_family: "Broken".to_string(),
        ..params("x")
    };
    assert!(matches!(
        node.add_text(&batch, &request),
        Err(NodeError::Text(TextError::FontParseError(_)))
    ));
}

#[test]
fn schema_lists_font_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Serif.ttf"), b"").unwrap();
    std::fs::write(dir.path().join("Mono.TTC"), b"").unwrap();
    let node = TextOverlayNode::new(dir.path());

    let schema = node.schema();
    assert_eq!(
        schema.input("font_family").unwrap().kind,
        glint_node::InputKind::Choice {
            options: vec!["Custom".to_string(), "Mono".to_string(), "Serif".to_string()]
        }
    );
}

const SYSTEM_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

#[test]
fn node_registers_under_its_class() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Serif.ttf"), b"").unwrap();
    let node = TextOverlayNode::new(dir.path());

    let mut registry = NodeRegistry::new();
    node.register(&mut registry);

    assert_eq!(registry.class_names().collect::<Vec<_>>(), vec!["AddText"]);
    assert_eq!(registry.display_name("AddText"), Some("AddTextToImage"));
    assert_eq!(registry.schema("AddText"), Some(&node.schema()));
}

/// Node over a temp directory holding a system font as family "Sans"
fn system_font_node() -> Option<(tempfile::TempDir, TextOverlayNode)> {
    let font = SYSTEM_FONTS.iter().map(Path::new).find(|p| p.exists())?;
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(font, dir.path().join("Sans.ttf")).unwrap();
    let node = TextOverlayNode::new(dir.path());
    Some((dir, node))
}

#[test]
fn partial_coverage_keeps_ink_color() {
    let mut layer = RgbaImage::new(1, 1);
    blend_coverage(layer.get_pixel_mut(0, 0), [255, 255, 255, 255], 128);

    let over_white = alpha_composite(&RgbImage::from_pixel(1, 1, WHITE), &layer).unwrap();
    assert_eq!(*over_white.get_pixel(0, 0), WHITE);

    let over_black = alpha_composite(&RgbImage::new(1, 1), &layer).unwrap();
    assert_eq!(*over_black.get_pixel(0, 0), Rgb([128, 128, 128]));
}

#[test]
fn white_text_on_white_leaves_image_unchanged() {
    let Some((_dir, node)) = system_font_node() else {
        println!("No system fonts available - skipping test (CI environment)");
        return;
    };

    let white = RgbImage::from_pixel(200, 100, WHITE);
    let batch = ImageBatch::from_rasters(TensorLayout::ChannelsLast, &[white]).unwrap();

    for rotation in [0, 30] {
        let request = TextOverlayParams {
            font_family: "Sans".to_string(),
            font_color: "#ffffff".to_string(),
            x: 10,
            y: 10,
            rotation,
            ..params("Hello")
        };
        let out = node.add_text(&batch, &request).unwrap();
        assert_eq!(out, batch, "rotation {rotation}");
    }
}

#[test]
fn add_text_with_real_font() {
    let Some((_dir, node)) = system_font_node() else {
        println!("No system fonts available - skipping test (CI environment)");
        return;
    };
    let batch = gray_batch(TensorLayout::ChannelsFirst, 2, 256, 128);

    let request = TextOverlayParams {
        font_family: "Sans".to_string(),
        font_size: 24,
        font_shadow_x: 2,
        font_shadow_y: 2,
        rotation: 15,
        ..params("Hello")
    };
    let out = node.add_text(&batch, &request).unwrap();
    assert_eq!(out.shape(), batch.shape());
    assert_ne!(out, batch);

    let invisible = TextOverlayParams {
        opacity: 0.0,
        font_shadow_x: 0,
        ..request
    };
    assert_eq!(node.add_text(&batch, &invisible).unwrap(), batch);
}
