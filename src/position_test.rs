mod position;

fn main() {
    let bodrum = (37.0344, 27.4295);
    let fethiye = (36.6515, 29.1145);
    let (dist, bearing) = position::distance_and_bearing(bodrum, fethiye);
    println!(
        "Bodrum to Fethiye: {:.3} km = {}, Compass Bearing: {:.3}° {}",
        dist / 1000.0,
        position::format_distance_nm(position::nautical_miles(dist / 1000.0)),
        bearing,
        position::compass_label(bearing),
    );

    let leg = [(37.0344, 27.4295), (36.8510, 28.2740), (36.6515, 29.1145)];
    let total = position::path_length_meters(&leg);
    println!(
        "Bodrum -> Marmaris -> Fethiye along the coast: {}",
        position::format_distance_nm(position::nautical_miles(total / 1000.0)),
    );
}
