//! Scene construction and teardown
//!
//! [`SceneHost`] owns every handle the scene allocates so that a teardown can
//! hand them all back to the asset stores.

use bevy::asset::RenderAssetUsages;
use bevy::ecs::system::SystemParam;
use bevy::light::NotShadowCaster;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::window::PrimaryWindow;
use rand::Rng;
use std::f32::consts::TAU;

use super::config::SceneConfig;
use super::graph::{BodyId, HoverTransition, SolarSystem};
use crate::catalog::BodyCatalog;
use crate::error::SceneError;
use crate::frame_loop::{FrameLoop, LoopToken, MountedToken};
use crate::picking::HoverChanged;
use crate::texture::{generate_body_texture, generate_sun_texture};

/// Every top-level entity spawned by the scene builder
#[derive(Component)]
pub struct SceneObject;

#[derive(Component)]
pub struct CentralBodyMesh;

/// Sphere of an orbiting body; the only pick target
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitingBody(pub BodyId);

/// Translucent halo around a body, never picked
#[derive(Component, Debug, Clone, Copy)]
pub struct GlowShell(pub BodyId);

#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitGuide(pub BodyId);

#[derive(Component)]
pub struct Starfield;

/// Handles allocated by the current scene
#[derive(Resource, Debug, Default)]
pub struct SceneAssets {
    pub images: Vec<Handle<Image>>,
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

impl SceneAssets {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.meshes.is_empty() && self.materials.is_empty()
    }
}

/// Host requests that change the scene lifetime
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Teardown,
    /// Tear down (if built) and build again from the catalog
    Rebuild,
    /// Tear down and exit the application
    Shutdown,
}

/// Closed polyline of `segments` points, evenly spaced by angle, at y = 0.
///
/// The first point is repeated at the end so a line strip closes.
pub fn orbit_guide_points(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = (i % segments) as f32 / segments as f32 * TAU;
            Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Uniformly scattered points inside the cube `[-extent, extent]³`
pub fn starfield_points<R: Rng>(count: usize, extent: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            )
        })
        .collect()
}

fn point_mesh(topology: PrimitiveTopology, points: Vec<Vec3>) -> Mesh {
    let normals = vec![Vec3::Y; points.len()];
    Mesh::new(topology, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, points)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

fn sphere_mesh(radius: f32, config: &SceneConfig) -> Mesh {
    Sphere::new(radius)
        .mesh()
        .uv(config.sphere_sectors, config.sphere_stacks)
}

/// Everything needed to build, keep, and release the scene
#[derive(SystemParam)]
pub struct SceneHost<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    images: ResMut<'w, Assets<Image>>,
    system: ResMut<'w, SolarSystem>,
    assets: ResMut<'w, SceneAssets>,
    frame_loop: ResMut<'w, FrameLoop>,
    mounted: ResMut<'w, MountedToken>,
    catalog: Res<'w, BodyCatalog>,
    config: Res<'w, SceneConfig>,
    windows: Query<'w, 's, (), With<PrimaryWindow>>,
    objects: Query<'w, 's, Entity, With<SceneObject>>,
}

impl SceneHost<'_, '_> {
    /// Build the scene and start the frame loop
    pub fn mount(&mut self) -> Result<LoopToken, SceneError> {
        self.build(&mut rand::thread_rng())?;
        let token = self.frame_loop.mount();
        self.mounted.0 = Some(token);
        Ok(token)
    }

    /// Populate the arena and spawn every renderable.
    ///
    /// All preconditions are checked before the first asset is allocated.
    pub fn build<R: Rng>(&mut self, rng: &mut R) -> Result<(), SceneError> {
        if self.windows.is_empty() {
            return Err(SceneError::MissingSurface);
        }
        self.system
            .populate(&self.catalog, self.config.visibility_boost)?;

        let config = &self.config;
        let assets = &mut self.assets;

        // Central body
        let sun_image = self
            .images
            .add(generate_sun_texture(config.sun_texture_size, rng).into_image());
        let sun_mesh = self.meshes.add(sphere_mesh(1.0, config));
        let sun_material = self.materials.add(StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: Some(sun_image.clone()),
            emissive: config.sun_emissive,
            emissive_texture: Some(sun_image.clone()),
            unlit: true,
            ..default()
        });
        self.commands
            .spawn((
                Mesh3d(sun_mesh.clone()),
                MeshMaterial3d(sun_material.clone()),
                Transform::from_scale(Vec3::splat(config.sun_scale)),
                NotShadowCaster,
                CentralBodyMesh,
                SceneObject,
                Name::new("Sun"),
            ))
            .with_children(|parent| {
                parent.spawn(PointLight {
                    intensity: config.sun_light_intensity,
                    range: config.sun_light_range,
                    shadows_enabled: true,
                    ..default()
                });
            });
        assets.images.push(sun_image);
        assets.meshes.push(sun_mesh);
        assets.materials.push(sun_material);

        let guide_material = self.materials.add(StandardMaterial {
            base_color: config.orbit_guide_color,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        assets.materials.push(guide_material.clone());

        for state in self.system.bodies() {
            let descriptor = &state.descriptor;
            let image = self.images.add(
                generate_body_texture(descriptor, config.body_texture_size, rng).into_image(),
            );
            let mesh = self.meshes.add(sphere_mesh(state.mesh_radius, config));
            let material = self.materials.add(StandardMaterial {
                base_color: Color::WHITE,
                base_color_texture: Some(image.clone()),
                perceptual_roughness: 0.9,
                metallic: 0.0,
                ..default()
            });

            let glow_mesh = self
                .meshes
                .add(sphere_mesh(state.mesh_radius * config.glow_scale, config));
            let glow_material = self.materials.add(StandardMaterial {
                base_color: descriptor.color.to_color().with_alpha(config.glow_opacity),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                cull_mode: Some(Face::Front),
                ..default()
            });

            self.commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(state.position),
                    OrbitingBody(state.id),
                    SceneObject,
                    Name::new(descriptor.name.clone()),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Mesh3d(glow_mesh.clone()),
                        MeshMaterial3d(glow_material.clone()),
                        Transform::default(),
                        NotShadowCaster,
                        GlowShell(state.id),
                    ));
                });

            let guide_mesh = self.meshes.add(point_mesh(
                PrimitiveTopology::LineStrip,
                orbit_guide_points(descriptor.orbit_radius, config.orbit_segments),
            ));
            self.commands.spawn((
                Mesh3d(guide_mesh.clone()),
                MeshMaterial3d(guide_material.clone()),
                Transform::default(),
                NotShadowCaster,
                OrbitGuide(state.id),
                SceneObject,
            ));

            assets.images.push(image);
            assets.meshes.extend([mesh, glow_mesh, guide_mesh]);
            assets.materials.extend([material, glow_material]);
        }

        let star_mesh = self.meshes.add(point_mesh(
            PrimitiveTopology::PointList,
            starfield_points(config.star_count, config.star_extent, rng),
        ));
        let star_material = self.materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        });
        self.commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::default(),
            NotShadowCaster,
            Starfield,
            SceneObject,
            Name::new("Starfield"),
        ));
        assets.meshes.push(star_mesh);
        assets.materials.push(star_material);

        info!(
            "Scene built: {} bodies, {} images, {} meshes, {} materials",
            self.system.bodies().len(),
            assets.images.len(),
            assets.meshes.len(),
            assets.materials.len()
        );
        Ok(())
    }

    /// Stop the frame loop, despawn the scene, and release every allocation.
    ///
    /// Safe to call on an unbuilt scene. Returns `Cleared` if a body was
    /// hovered when the arena went away.
    pub fn teardown(&mut self) -> Option<HoverTransition> {
        self.frame_loop.teardown();
        let released = !self.assets.is_empty();

        for entity in self.objects.iter() {
            self.commands.entity(entity).despawn();
        }
        for handle in self.assets.images.drain(..) {
            self.images.remove(&handle);
        }
        for handle in self.assets.meshes.drain(..) {
            self.meshes.remove(&handle);
        }
        for handle in self.assets.materials.drain(..) {
            self.materials.remove(&handle);
        }
        if released {
            info!("Scene torn down");
        }
        self.system.clear()
    }
}

/// Startup system: build the scene once; failure exits the app
pub fn setup_scene(mut host: SceneHost, mut exit: MessageWriter<AppExit>) {
    match host.mount() {
        Ok(token) => debug!("Frame loop mounted ({:?})", token),
        Err(e) => {
            error!("Failed to build scene: {}", e);
            exit.write(AppExit::error());
        }
    }
}

/// Every command starts with a teardown; the end of an active hover is reported
pub fn handle_scene_commands(
    mut requests: MessageReader<SceneCommand>,
    mut host: SceneHost,
    mut hover_changed: MessageWriter<HoverChanged>,
    mut exit: MessageWriter<AppExit>,
) {
    for request in requests.read() {
        if host.teardown() == Some(HoverTransition::Cleared) {
            hover_changed.write(HoverChanged::cleared());
        }
        match request {
            SceneCommand::Teardown => {}
            SceneCommand::Rebuild => {
                if let Err(e) = host.mount() {
                    error!("Failed to rebuild scene: {}", e);
                }
            }
            SceneCommand::Shutdown => {
                exit.write(AppExit::Success);
            }
        }
    }
}
