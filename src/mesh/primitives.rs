/// Procedural demo meshes: an icosahedron and its subdivided icosphere.
/// Kept in the library so benches and tests can build real geometry.
use glam::Vec3;

use super::Mesh;

/// Unit icosahedron with flat per-corner normals taken from the vertex
/// positions (which lie on the unit sphere).
pub fn icosahedron() -> Mesh {
    let phi = (1.0f32 + 5.0f32.sqrt()) * 0.5;
    let a = 1.0;
    let b = 1.0 / phi;

    let mut vertices = vec![
        Vec3::new(0.0, b, -a),
        Vec3::new(b, a, 0.0),
        Vec3::new(-b, a, 0.0),
        Vec3::new(0.0, b, a),
        Vec3::new(0.0, -b, a),
        Vec3::new(-a, 0.0, b),
        Vec3::new(0.0, -b, -a),
        Vec3::new(a, 0.0, -b),
        Vec3::new(a, 0.0, b),
        Vec3::new(-a, 0.0, -b),
        Vec3::new(b, -a, 0.0),
        Vec3::new(-b, -a, 0.0),
    ];

    for vertex in &mut vertices {
        *vertex = vertex.normalize();
    }

    let triangles: Vec<[usize; 3]> = vec![
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    let triangle_normals = triangles
        .iter()
        .map(|t| [vertices[t[0]], vertices[t[1]], vertices[t[2]]])
        .collect();

    Mesh::new(vertices, triangles, triangle_normals)
}

/// Subdivide the icosahedron `subdivisions` times, pushing every midpoint
/// back onto the unit sphere. Each level quadruples the triangle count.
pub fn icosphere(subdivisions: usize) -> Mesh {
    let seed = icosahedron();

    let mut vertices = seed.vertices;
    let mut triangles = seed.triangles;
    let mut triangle_normals = seed.triangle_normals;

    for _ in 0..subdivisions {
        let mut next_vertices = vertices.clone();
        let mut next_triangles = Vec::with_capacity(triangles.len() * 4);
        let mut next_normals = Vec::with_capacity(triangles.len() * 4);

        for triangle in &triangles {
            let v0 = vertices[triangle[0]];
            let v1 = vertices[triangle[1]];
            let v2 = vertices[triangle[2]];

            let mid01 = ((v0 + v1) * 0.5).normalize();
            let mid12 = ((v1 + v2) * 0.5).normalize();
            let mid20 = ((v2 + v0) * 0.5).normalize();

            next_vertices.push(mid01);
            next_vertices.push(mid12);
            next_vertices.push(mid20);

            let index01 = next_vertices.len() - 3;
            let index12 = next_vertices.len() - 2;
            let index20 = next_vertices.len() - 1;

            next_triangles.push([triangle[0], index01, index20]);
            next_triangles.push([triangle[1], index12, index01]);
            next_triangles.push([triangle[2], index20, index12]);
            next_triangles.push([index01, index12, index20]);

            // On a unit sphere the normal at a vertex equals its position.
            next_normals.push([v0, mid01, mid20]);
            next_normals.push([v1, mid12, mid01]);
            next_normals.push([v2, mid20, mid12]);
            next_normals.push([mid01, mid12, mid20]);
        }

        vertices = next_vertices;
        triangles = next_triangles;
        triangle_normals = next_normals;
    }

    Mesh::new(vertices, triangles, triangle_normals)
}
