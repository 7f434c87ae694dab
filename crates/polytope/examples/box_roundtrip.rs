//! Round-trip a box through both representations.

use nalgebra::dvector;
use polytope::Polytope;

fn main() -> polytope::Result<()> {
    let mut p = Polytope::from_bounds(dvector![-1.0, -2.0], dvector![2.0, 1.0])?;
    println!("{p}");

    p.determine_v_rep()?;
    for v in p.sorted_vertices().unwrap_or_default() {
        println!("vertex ({:.3}, {:.3})", v[0], v[1]);
    }

    p.minimize_h_rep()?;
    println!("after minimization: {p}");
    Ok(())
}
