use crate::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB{
    pub x: Interval,
    pub y: Interval,
    pub z: Interval
}

impl Index<usize> for AABB {
    type Output = Interval;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds: {}", index),
        }
    }
}

impl Add<&Vector> for &AABB{
    type Output = AABB;
    fn add(self, offset: &Vector) -> Self::Output{
        let x = &self.x + offset.x;
        let y = &self.y + offset.y;
        let z = &self.z + offset.z;
        Self::Output{x, y, z}
    }
}

impl Default for AABB{
    fn default() -> Self{
        AABB::NONE
    }
}

impl AABB{
    pub const NONE: Self = Self{
        x:Interval::NONE,
        y:Interval::NONE,
        z:Interval::NONE,
    };
    pub fn enclosing_point(a: &Point, b: &Point) -> Self{
        let x = Interval::ordered(a.x, b.x);
        let y = Interval::ordered(a.y, b.y);
        let z = Interval::ordered(a.z, b.z);
        Self{x, y, z}.padded()
    }
    /// Smallest box holding both `a` and `b`.
    pub fn surrounding(a: &Self, b: &Self) -> Self{
        let x = Interval::enclosing(&a.x, &b.x);
        let y = Interval::enclosing(&a.y, &b.y);
        let z = Interval::enclosing(&a.z, &b.z);
        Self{x, y, z}
    }
    pub fn contains_box(&self, other: &Self) -> bool{
        (0..3).all(|axis| self[axis].min <= other[axis].min && other[axis].max <= self[axis].max)
    }
    pub fn center(&self, axis: usize) -> Float{
        let interval = &self[axis];
        0.5 * (interval.min + interval.max)
    }
    pub fn corners(&self) -> impl Iterator<Item = Point> + '_ {
        (0..8).map(move |i| Point::new(
            if i & 1 == 0 {self.x.min} else {self.x.max},
            if i & 2 == 0 {self.y.min} else {self.y.max},
            if i & 4 == 0 {self.z.min} else {self.z.max},
        ))
    }
    pub fn hit(&self, ray: &Ray, ray_t: &Interval) -> bool{
        let mut t_min = ray_t.min;
        let mut t_max = ray_t.max;
        for axis in 0..3{
            let interval = &self[axis];
            let dinv = ray.dir[axis].recip();
            let from = ray.orig[axis];

            let t0 = (interval.min - from) * dinv;
            let t1 = (interval.max - from) * dinv;

            let (t0, t1) = if t0<=t1 {(t0, t1)} else {(t1, t0)};
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max <= t_min {return false;}
        }
        true
    }
    pub fn longest_axis(&self) -> usize {
        if self.x.len() > self.y.len() && self.x.len() > self.z.len() {
            0
        } else if self.y.len() > self.z.len() {
            1
        } else {
            2
        }
    }
    fn padded(self) -> Self{
        const DELTA: Float = 0.0001;
        let x = if self.x.len() < DELTA { self.x.expanded(DELTA/2.0) } else {self.x};
        let y = if self.y.len() < DELTA { self.y.expanded(DELTA/2.0) } else {self.y};
        let z = if self.z.len() < DELTA { self.z.expanded(DELTA/2.0) } else {self.z};
        Self{x, y, z}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_aabb_surrounding_contains_both() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let a = AABB::enclosing_point(
                &Point::random_range(&mut rng, -10.0, 10.0),
                &Point::random_range(&mut rng, -10.0, 10.0),
            );
            let b = AABB::enclosing_point(
                &Point::random_range(&mut rng, -10.0, 10.0),
                &Point::random_range(&mut rng, -10.0, 10.0),
            );
            let s = AABB::surrounding(&a, &b);
            assert!(s.contains_box(&a));
            assert!(s.contains_box(&b));
        }
    }

    #[test]
    fn test_aabb_surrounding_with_none_is_identity() {
        let a = AABB::enclosing_point(&Point::ZERO, &Point::ONE);
        assert_eq!(AABB::surrounding(&AABB::NONE, &a), a);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = AABB::enclosing_point(&Point::splat(-1.0), &Point::splat(1.0));
        let all = Interval::new(0.0, 100.0);

        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::Z);
        assert!(aabb.hit(&ray, &all));

        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), -Vector::Z);
        assert!(!aabb.hit(&ray, &all));

        let ray = Ray::new(Point::new(10.0, 0.0, 0.0), Vector::Z);
        assert!(!aabb.hit(&ray, &all));

        // Interval ending before the box.
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::Z);
        assert!(!aabb.hit(&ray, &Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_flat_box_is_padded() {
        let flat = AABB::enclosing_point(&Point::new(0.0, 2.0, 0.0), &Point::new(1.0, 2.0, 1.0));
        assert!(flat.y.len() > 0.0);
        let ray = Ray::new(Point::new(0.5, 5.0, 0.5), -Vector::Y);
        assert!(flat.hit(&ray, &Interval::new(0.0, 10.0)));
    }

    #[test]
    fn test_longest_axis_and_center() {
        let aabb = AABB::enclosing_point(&Point::ZERO, &Point::new(1.0, 10.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);
        assert_eq!(aabb.center(1), 5.0);
        assert_eq!(aabb.corners().count(), 8);
    }
}
