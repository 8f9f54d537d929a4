use crate::grid::Grid;

/// Write the field as a PNG heat map, normalized by its maximum value.
pub fn grid_to_image<F: AsRef<std::path::Path>>(grid: &Grid, path: &F) {
    let gradient = colorous::TURBO;
    let max = grid.max_value();
    let scale = if max > 0.0 { 1.0 / max } else { 1.0 };
    let mut img = image::RgbImage::new(grid.cols() as u32, grid.rows() as u32);
    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            let c = gradient.eval_continuous(grid.get(i, j) * scale);
            img.put_pixel(j as u32, i as u32, image::Rgb(c.as_array()));
        }
    }
    img.save(path).expect("Couldn't save image");
}
