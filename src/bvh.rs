use crate::*;

/// Bounding volume hierarchy node.
///
/// A node built from one surface keeps it alone in `left`; two surfaces
/// become a leaf pair; larger sets split at the median along the longest
/// axis of their union box.
pub struct BVHNode{
    left: Box<Surface>,
    right: Option<Box<Surface>>,
    bbox: AABB
}

impl BVHNode{
    /// Builds a hierarchy over `list`, or `None` when the list is empty.
    pub fn from_hittable_list(list: HittableList) -> Option<Self>{
        if list.objects.is_empty(){
            None
        } else {
            Some(Self::from_vec(list.objects))
        }
    }
    fn from_vec(mut objects: Vec<Surface>) -> Self{
        let bbox = objects.iter()
            .fold(AABB::NONE, |bbox, object| AABB::surrounding(&bbox, object.bounding_box()));
        let axis = bbox.longest_axis();

        match objects.len(){
            0 => unreachable!("BVH nodes are never built from an empty set"),
            1 => {
                let left = Box::new(objects.remove(0));
                Self{left, right: None, bbox}
            },
            2 => {
                let right = objects.pop().map(Box::new);
                let left = Box::new(objects.remove(0));
                Self{left, right, bbox}
            },
            span => {
                objects.sort_by(|a, b| {
                    a.bounding_box().center(axis).total_cmp(&b.bounding_box().center(axis))
                });
                let upper = objects.split_off(span/2);
                let left = Box::new(Surface::Bvh(BVHNode::from_vec(objects)));
                let right = Some(Box::new(Surface::Bvh(BVHNode::from_vec(upper))));
                Self{left, right, bbox}
            }
        }
    }
    pub fn hit(&self, ray: &Ray, t:&Interval, rng: &mut dyn RngCore) -> Option<HitRecord>{
        if !self.bbox.hit(ray, t){
            return None;
        }
        let left = self.left.hit(ray, t, rng);
        let Some(right) = &self.right else {
            return left;
        };
        let bound = left.as_ref().map_or(t.max, |record| record.t);
        right.hit(ray, &t.up_to(bound), rng).or(left)
    }
    pub fn bounding_box(&self) -> &AABB {
        &self.bbox
    }
    /// Number of nodes in this subtree, for diagnostics.
    pub fn node_count(&self) -> usize{
        let count = |child: &Surface| match child {
            Surface::Bvh(node) => node.node_count(),
            _ => 0,
        };
        1 + count(&self.left) + self.right.as_deref().map_or(0, count)
    }
    pub fn depth(&self) -> usize{
        let depth = |child: &Surface| match child {
            Surface::Bvh(node) => node.depth(),
            _ => 0,
        };
        1 + depth(&self.left).max(self.right.as_deref().map_or(0, depth))
    }
}

impl HittableList{
    /// Replaces a flat list with a hierarchy over its members.
    pub fn into_bvh(self) -> Surface{
        match BVHNode::from_hittable_list(self){
            Some(node) => Surface::Bvh(node),
            None => Surface::List(HittableList::new()),
        }
    }
}
