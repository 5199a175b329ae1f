use bincode::{Decode, Encode};
use helm_traits::{HelmError, HelmResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Index, IndexMut, Mul};

/// Three named slots: x/y/z, or roll/pitch/yaw when used as angles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Encode, Decode, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis3<T> {
    vals: [T; 3],
}

pub type Axis3r = Axis3<f32>;

impl<T> Axis3<T> {
    pub const AXIS_COUNT: usize = 3;

    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { vals: [x, y, z] }
    }

    pub fn get(&self, index: usize) -> HelmResult<&T> {
        self.vals
            .get(index)
            .ok_or_else(|| HelmError::index_out_of_range(index, Self::AXIS_COUNT))
    }

    pub fn get_mut(&mut self, index: usize) -> HelmResult<&mut T> {
        self.vals
            .get_mut(index)
            .ok_or_else(|| HelmError::index_out_of_range(index, Self::AXIS_COUNT))
    }

    pub fn as_array(&self) -> &[T; 3] {
        &self.vals
    }

    pub fn x_mut(&mut self) -> &mut T {
        &mut self.vals[0]
    }

    pub fn y_mut(&mut self) -> &mut T {
        &mut self.vals[1]
    }

    pub fn z_mut(&mut self) -> &mut T {
        &mut self.vals[2]
    }
}

impl<T: Copy> Axis3<T> {
    pub fn x(&self) -> T {
        self.vals[0]
    }

    pub fn y(&self) -> T {
        self.vals[1]
    }

    pub fn z(&self) -> T {
        self.vals[2]
    }

    pub fn roll(&self) -> T {
        self.vals[0]
    }

    pub fn pitch(&self) -> T {
        self.vals[1]
    }

    pub fn yaw(&self) -> T {
        self.vals[2]
    }
}

impl<T: Copy + Default> Axis3<T> {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Axis3<f32> {
    pub const ZERO: Self = Axis3::new(0.0, 0.0, 0.0);
}

impl<T: Copy + Mul<Output = T>> Axis3<T> {
    /// Element-wise product, not a dot product.
    pub fn col_wise_multiply(&self, other: &Self) -> Self {
        Axis3::new(
            self.vals[0] * other.vals[0],
            self.vals[1] * other.vals[1],
            self.vals[2] * other.vals[2],
        )
    }
}

impl<T: Copy + Mul<Output = T>> Mul for Axis3<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.col_wise_multiply(&rhs)
    }
}

/// Unchecked access: out of range is a programming error and panics.
/// Use [`Axis3::get`] when the index comes from outside.
impl<T> Index<usize> for Axis3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.vals[index]
    }
}

impl<T> IndexMut<usize> for Axis3<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.vals[index]
    }
}

/// An [`Axis3`] plus a fourth slot, the throttle when the vector is a goal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Encode, Decode)]
pub struct Axis4<T> {
    axis3: Axis3<T>,
    val4: T,
}

pub type Axis4r = Axis4<f32>;

impl<T> Axis4<T> {
    pub const AXIS_COUNT: usize = 4;

    pub const fn new(x: T, y: T, z: T, val4: T) -> Self {
        Self {
            axis3: Axis3::new(x, y, z),
            val4,
        }
    }

    pub const fn from_axis3(axis3: Axis3<T>, val4: T) -> Self {
        Self { axis3, val4 }
    }

    pub fn axis3(&self) -> &Axis3<T> {
        &self.axis3
    }

    pub fn axis3_mut(&mut self) -> &mut Axis3<T> {
        &mut self.axis3
    }

    pub fn set_axis3(&mut self, axis3: Axis3<T>) {
        self.axis3 = axis3;
    }

    pub fn get(&self, index: usize) -> HelmResult<&T> {
        match index {
            0..=2 => self.axis3.get(index),
            3 => Ok(&self.val4),
            _ => Err(HelmError::index_out_of_range(index, Self::AXIS_COUNT)),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> HelmResult<&mut T> {
        match index {
            0..=2 => self.axis3.get_mut(index),
            3 => Ok(&mut self.val4),
            _ => Err(HelmError::index_out_of_range(index, Self::AXIS_COUNT)),
        }
    }

    pub fn val4_mut(&mut self) -> &mut T {
        &mut self.val4
    }

    pub fn set_throttle(&mut self, throttle: T) {
        self.val4 = throttle;
    }
}

impl<T: Copy> Axis4<T> {
    pub fn x(&self) -> T {
        self.axis3.x()
    }

    pub fn y(&self) -> T {
        self.axis3.y()
    }

    pub fn z(&self) -> T {
        self.axis3.z()
    }

    pub fn roll(&self) -> T {
        self.axis3.roll()
    }

    pub fn pitch(&self) -> T {
        self.axis3.pitch()
    }

    pub fn yaw(&self) -> T {
        self.axis3.yaw()
    }

    pub fn val4(&self) -> T {
        self.val4
    }

    pub fn throttle(&self) -> T {
        self.val4
    }

    /// Packs the horizontal pair and the fourth slot as (x, y, val4).
    /// Slot 2 is dropped; this is the historical packing consumers rely on.
    pub fn to_xyz(&self) -> Axis3<T> {
        Axis3::new(self.axis3.x(), self.axis3.y(), self.val4)
    }
}

impl<T: Copy + Default> Axis4<T> {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Inverse packing of [`Axis4::to_xyz`]: (x, y, z) becomes (x, y, 0, z).
    pub fn from_xyz(xyz: &Axis3<T>) -> Self {
        Axis4::new(xyz.x(), xyz.y(), T::default(), xyz.z())
    }
}

impl Axis4<f32> {
    pub const ZERO: Self = Axis4::new(0.0, 0.0, 0.0, 0.0);
}

impl<T: Copy + Mul<Output = T>> Axis4<T> {
    pub fn col_wise_multiply(&self, other: &Self) -> Self {
        Axis4::from_axis3(
            self.axis3.col_wise_multiply(&other.axis3),
            self.val4 * other.val4,
        )
    }
}

impl<T: Copy + Mul<Output = T>> Mul for Axis4<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.col_wise_multiply(&rhs)
    }
}

impl<T> Index<usize> for Axis4<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match index {
            3 => &self.val4,
            _ => &self.axis3[index],
        }
    }
}

impl<T> IndexMut<usize> for Axis4<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match index {
            3 => &mut self.val4,
            _ => &mut self.axis3[index],
        }
    }
}

// Serialized as a flat 4-tuple so configuration files read (roll, pitch, yaw, throttle).
impl<T: Serialize> Serialize for Axis4<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let [x, y, z] = self.axis3.as_array();
        (x, y, z, &self.val4).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Axis4<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y, z, val4) = <(T, T, T, T)>::deserialize(deserializer)?;
        Ok(Axis4::new(x, y, z, val4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_traits::ErrorKind;

    #[test]
    fn test_named_views_alias_slots() {
        let a = Axis3r::new(1.0, 2.0, 3.0);
        assert_eq!((a.x(), a.y(), a.z()), (a.roll(), a.pitch(), a.yaw()));
        let g = Axis4r::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(g.throttle(), g.val4());
        assert_eq!(g[3], 0.4);
        assert_eq!(g.yaw(), 0.3);
    }

    #[test]
    fn test_col_wise_multiply() {
        let limits = Axis3r::new(0.5, 0.25, 2.0);
        let sticks = Axis3r::new(-1.0, 0.5, 0.25);
        assert_eq!(limits * sticks, Axis3r::new(-0.5, 0.125, 0.5));

        let a = Axis4r::new(1.0, 2.0, 3.0, 4.0);
        let b = Axis4r::new(2.0, 2.0, 2.0, 0.5);
        assert_eq!(a.col_wise_multiply(&b), Axis4r::new(2.0, 4.0, 6.0, 2.0));
    }

    #[test]
    fn test_checked_access() {
        let mut a = Axis3r::new(1.0, 2.0, 3.0);
        assert_eq!(*a.get(2).unwrap(), 3.0);
        assert_eq!(a.get(3).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        *a.get_mut(0).unwrap() = 9.0;
        assert_eq!(a.x(), 9.0);

        let mut g = Axis4r::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(*g.get(3).unwrap(), 4.0);
        assert_eq!(g.get(4).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert!(g.get_mut(17).is_err());
        *g.get_mut(1).unwrap() = -2.0;
        assert_eq!(g.pitch(), -2.0);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_access_panics() {
        let g = Axis4r::ZERO;
        let _ = g[4];
    }

    #[test]
    fn test_zero() {
        assert_eq!(Axis4r::zero(), Axis4r::ZERO);
        assert_eq!(Axis3r::zero(), Axis3r::ZERO);
    }

    #[test]
    fn test_set_axis3_keeps_fourth_slot() {
        let mut g = Axis4r::new(1.0, 1.0, 1.0, 0.6);
        g.set_axis3(Axis3r::ZERO);
        assert_eq!(g, Axis4r::new(0.0, 0.0, 0.0, 0.6));
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Axis4r::new(0.1 + 0.2, 0.0, 0.0, 0.0);
        let b = Axis4r::new(0.3, 0.0, 0.0, 0.0);
        assert_eq!(a == b, (0.1f32 + 0.2f32) == 0.3f32);
        assert_ne!(Axis4r::new(0.0, 0.0, 0.0, 1.0), Axis4r::ZERO);
    }
}
