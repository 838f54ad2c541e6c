//! End-to-end despill scenarios through the parallel row driver.

use approx::assert_abs_diff_eq;
use despill_core::{ImageBuf, Rect};
use despill_math::{Color3, LumaMode};
use despill_ops::parallel::RowDriver;
use despill_ops::{
    ChannelSlot, ColorSelect, DespillMath, DespillParameters, DespillSetup, DespillSources,
    OpsError, OutputType,
};

fn run(params: DespillParameters, sources: DespillSources<'_>) -> ImageBuf {
    let setup = DespillSetup::new(params, sources.connected()).unwrap();
    RowDriver::new(2).unwrap().run(&setup, sources, None).unwrap()
}

fn green_spill_params() -> DespillParameters {
    DespillParameters {
        color: ColorSelect::Green,
        despill_math: DespillMath::Max,
        hue_limit: 1.0,
        respill_math: LumaMode::Rec709,
        respill_color: Color3::ONE,
        output_type: OutputType::Despill,
        output_alpha: true,
        ..Default::default()
    }
}

#[test]
fn test_green_spill_end_to_end() {
    let src = ImageBuf::filled(16, 9, &[0.1, 0.9, 0.1, 1.0]).unwrap();
    let out = run(green_spill_params(), DespillSources::new(&src));

    for y in 0..9 {
        for x in 0..16 {
            let px = out.pixel(x, y);
            assert_abs_diff_eq!(px[0], 0.672, epsilon = 1e-3);
            assert_abs_diff_eq!(px[1], 0.672, epsilon = 1e-3);
            assert_abs_diff_eq!(px[2], 0.672, epsilon = 1e-3);
            assert_abs_diff_eq!(px[3], 0.572, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_alpha_passthrough_when_disabled() {
    let src = ImageBuf::filled(4, 4, &[0.1, 0.9, 0.1, 0.25]).unwrap();
    let params = DespillParameters {
        output_alpha: false,
        ..green_spill_params()
    };
    let out = run(params, DespillSources::new(&src));
    assert_eq!(out.channels(), 4);
    assert_eq!(out.pixel(2, 2)[3], 0.25);
}

#[test]
fn test_matte_to_custom_channel() {
    let src = ImageBuf::filled(4, 4, &[0.1, 0.9, 0.1, 0.25]).unwrap();
    let params = DespillParameters {
        output_type: OutputType::Spill,
        output_channel: ChannelSlot::Red,
        ..green_spill_params()
    };
    let out = run(params, DespillSources::new(&src));
    let px = out.pixel(1, 1);
    // spill written to RGB, then the amount overwrites red
    assert_abs_diff_eq!(px[0], 0.8 * 0.7152, epsilon = 1e-5);
    assert_abs_diff_eq!(px[1], 0.8, epsilon = 1e-5);
    assert_eq!(px[3], 0.25);
}

#[test]
fn test_blue_screen_preset_leaves_neutral_pixels() {
    let mut src = ImageBuf::filled(8, 1, &[0.4, 0.4, 0.4]).unwrap();
    src.pixel_mut(0, 0).copy_from_slice(&[0.2, 0.3, 0.95]);
    let params = DespillParameters {
        respill_color: Color3::ZERO,
        ..DespillParameters::blue_screen()
    };
    let out = run(params, DespillSources::new(&src));

    // average of red/green caps blue
    assert_abs_diff_eq!(out.pixel(0, 0)[2], 0.25, epsilon = 1e-6);
    // gray pixels carry no spill
    assert_abs_diff_eq!(out.pixel(5, 0)[0], 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(out.pixel(5, 0)[2], 0.4, epsilon = 1e-6);
}

#[test]
fn test_image_driven_color() {
    // left half has a green driving color, right half gray (hue shift 0, red target)
    let src = ImageBuf::filled(4, 2, &[0.1, 0.9, 0.1]).unwrap();
    let mut color = ImageBuf::filled(4, 2, &[0.5, 0.5, 0.5]).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            color.pixel_mut(x, y).copy_from_slice(&[0.0, 1.0, 0.0]);
        }
    }
    let params = DespillParameters {
        color: ColorSelect::Pick,
        pick: Color3::ZERO,
        ..green_spill_params()
    };
    let out = run(params, DespillSources::new(&src).with_color(&color));
    assert!(out.pixel(0, 0)[1] < 0.7);
    // red is already below max(green, blue): nothing to remove, matte written as 0
    assert_eq!(out.pixel(3, 1), &[0.1, 0.9, 0.1, 0.0]);
}

#[test]
fn test_gray_driving_color_despills_red() {
    let src = ImageBuf::filled(2, 2, &[0.9, 0.1, 0.1, 1.0]).unwrap();
    let color = ImageBuf::filled(2, 2, &[0.5, 0.5, 0.5]).unwrap();
    let params = DespillParameters {
        color: ColorSelect::Pick,
        pick: Color3::ZERO,
        despill_math: DespillMath::Average,
        respill_color: Color3::ZERO,
        ..green_spill_params()
    };
    let out = run(params, DespillSources::new(&src).with_color(&color));
    let px = out.pixel(1, 1);
    assert_abs_diff_eq!(px[0], 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(px[3], 0.8 * 0.2126, epsilon = 1e-5);
}

#[test]
fn test_limit_mask_blends_strength() {
    let src = ImageBuf::filled(3, 1, &[0.1, 0.9, 0.1]).unwrap();
    let mask = ImageBuf::from_data(3, 1, 4, vec![
        0.0, 0.0, 0.0, 1.0, //
        0.0, 0.0, 0.0, 0.5, //
        0.0, 0.0, 0.0, 0.0, //
    ])
    .unwrap();
    let params = DespillParameters {
        respill_color: Color3::ZERO,
        output_alpha: false,
        ..green_spill_params()
    };
    let out = run(params, DespillSources::new(&src).with_limit(&mask));
    assert_abs_diff_eq!(out.pixel(0, 0)[1], 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(out.pixel(1, 0)[1], 0.05, epsilon = 1e-6);
    assert_abs_diff_eq!(out.pixel(2, 0)[1], 0.0, epsilon = 1e-6);
}

#[test]
fn test_limit_missing_channel() {
    let src = ImageBuf::filled(2, 2, &[0.1, 0.9, 0.1]).unwrap();
    let mask = ImageBuf::filled(2, 2, &[1.0, 1.0, 1.0]).unwrap();
    let sources = DespillSources::new(&src).with_limit(&mask);
    let setup = DespillSetup::new(green_spill_params(), sources.connected()).unwrap();
    let err = RowDriver::new(1).unwrap().run(&setup, sources, None).unwrap_err();
    assert!(matches!(
        err,
        OpsError::ChannelMismatch {
            input: "limit",
            expected: 4,
            got: 3
        }
    ));
}

#[test]
fn test_region_and_protect_preview() {
    let skin = Color3::new(0.8, 0.6, 0.5);
    let src = ImageBuf::filled(6, 6, &[0.8, 0.6, 0.5, 1.0]).unwrap();
    let params = DespillParameters {
        protect_tones: true,
        protect_preview: true,
        protect_color: skin,
        protect_effect: 1.0,
        ..green_spill_params()
    };
    let sources = DespillSources::new(&src);
    let setup = DespillSetup::new(params, sources.connected()).unwrap();
    let out = RowDriver::new(0)
        .unwrap()
        .run(&setup, sources, Some(Rect::new(2, 2, 10, 10)))
        .unwrap();
    // inside: full protection => rgb * 1; outside untouched; alpha never written
    assert_abs_diff_eq!(out.pixel(4, 4)[0], 0.8, epsilon = 1e-4);
    assert_eq!(out.pixel(0, 0), &[0.8, 0.6, 0.5, 1.0]);
    assert_eq!(out.pixel(4, 4)[3], 1.0);
}
