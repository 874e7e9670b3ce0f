use std::time::Instant;

use argh::FromArgs;
use rectify::{
    geometry::Point2d,
    imgproc::interpolation::InterpolationMode,
    io::functional::{read_image_any_rgb8, write_image_any},
    rectify_with_config, RectifyConfig,
};

/// Flattens the quadrilateral spanned by four points into a full size image
#[derive(Debug, FromArgs)]
struct Args {
    /// image path
    #[argh(positional)]
    path: String,

    /// a corner as `x,y` in pixels, given four times in any order
    #[argh(option, short = 'p', from_str_fn(parse_point))]
    point: Vec<Point2d>,

    /// output image path, the format follows the extension
    #[argh(option, short = 'o', default = "String::from(\"rectified.png\")")]
    output: String,

    /// interpolation mode: bilinear or nearest
    #[argh(
        option,
        short = 'i',
        default = "InterpolationMode::Bilinear",
        from_str_fn(parse_interpolation)
    )]
    interpolation: InterpolationMode,
}

fn parse_point(value: &str) -> Result<Point2d, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{s}`: {e}"))
    };
    Ok(Point2d::new(parse(x)?, parse(y)?))
}

fn parse_interpolation(value: &str) -> Result<InterpolationMode, String> {
    match value {
        "bilinear" => Ok(InterpolationMode::Bilinear),
        "nearest" => Ok(InterpolationMode::Nearest),
        _ => Err("Unsupported interpolation mode".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let image = read_image_any_rgb8(&args.path)?;
    log::info!("read {} with size {}", args.path, image.size());

    let config = RectifyConfig {
        interpolation: args.interpolation,
        ..Default::default()
    };

    let start = Instant::now();
    let output = rectify_with_config(&image, &args.point, &config)?;
    log::info!("rectified in {:?}", start.elapsed());

    write_image_any(&args.output, &output)?;
    log::info!("wrote {}", args.output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_parse() {
        assert_eq!(parse_point("10,20.5"), Ok(Point2d::new(10.0, 20.5)));
        assert_eq!(parse_point(" 1 , 2 "), Ok(Point2d::new(1.0, 2.0)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn interpolation_parse() {
        assert_eq!(
            parse_interpolation("nearest"),
            Ok(InterpolationMode::Nearest)
        );
        assert!(parse_interpolation("bicubic").is_err());
    }
}
