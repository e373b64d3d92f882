use common::ByteCursor;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn read(cursor: &mut ByteCursor<'_>) -> common::Result<Self> {
        let [x, y, z] = cursor.read_f32_array::<3>()?;
        Ok(Self { x, y, z })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Cylinder {
    pub position: Vec3,
    pub ax1: f32,
    pub ax2: f32,
}

impl Cylinder {
    pub fn read(cursor: &mut ByteCursor<'_>) -> common::Result<Self> {
        Ok(Self {
            position: Vec3::read(cursor)?,
            ax1: cursor.read_f32()?,
            ax2: cursor.read_f32()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn read(cursor: &mut ByteCursor<'_>) -> common::Result<Self> {
        Ok(Self {
            position: Vec3::read(cursor)?,
            radius: cursor.read_f32()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn read(cursor: &mut ByteCursor<'_>) -> common::Result<Self> {
        Ok(Self {
            min: Vec3::read(cursor)?,
            max: Vec3::read(cursor)?,
        })
    }
}
