/// Numeric type used for most calculations in the engine
pub type Number = f64;
pub type Vector2 = glamour::Vector2<Number>;
pub type Vector3 = glamour::Vector3<Number>;
pub type Point2 = glamour::Point2<Number>;
pub type Point3 = glamour::Point3<Number>;
