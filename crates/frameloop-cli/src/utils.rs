use core::fmt::Display;
use std::str::FromStr;

use clap::ValueEnum;
use frameloop::scene::{
    examples::{BasicsScene, SceneSetup, SpotlightScene},
    SceneT,
};

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableScene {
    Basics,
    #[default]
    Spotlight,
}

impl AvailableScene {
    pub fn insert_into(self, scene: &mut impl SceneT) -> SceneSetup {
        match self {
            AvailableScene::Basics => BasicsScene::insert_into(scene),
            AvailableScene::Spotlight => SpotlightScene::insert_into(scene),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once('x') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `width`x`height`"));
        };
        let width: u32 = a.trim().parse()?;
        let height: u32 = b.trim().parse()?;
        if width == 0 || height == 0 {
            anyhow::bail!("Dimensions must be non zero, got {s}");
        }

        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A position on screen, in pixels from the top left corner
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl FromStr for ScreenPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once(',') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `x`,`y`"));
        };
        Ok(ScreenPoint {
            x: a.trim().parse()?,
            y: b.trim().parse()?,
        })
    }
}

/// Pointer positions along the screen diagonal, from the top left to the bottom
/// right corner in `steps` positions
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sweep {
    pub dimensions: Dimensions,
    pub steps: u64,
}

impl Sweep {
    pub fn new(dimensions: Dimensions, steps: u64) -> Self {
        Self {
            dimensions,
            steps: steps.max(2),
        }
    }

    /// Position `i`, positions past the end stay on the last corner
    pub fn point(&self, i: u64) -> ScreenPoint {
        let f = i.min(self.steps - 1) as f32 / (self.steps - 1) as f32;
        ScreenPoint {
            x: f * self.dimensions.width as f32,
            y: f * self.dimensions.height as f32,
        }
    }
}

/// `name=value`, the value in the text form the parameter kind accepts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamOverride {
    pub name: String,
    pub value: String,
}

impl FromStr for ParamOverride {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, value)) = s.split_once('=') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `name`=`value`"));
        };
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Missing parameter name in {s:?}");
        }
        Ok(ParamOverride {
            name: name.to_owned(),
            value: value.trim().to_owned(),
        })
    }
}
