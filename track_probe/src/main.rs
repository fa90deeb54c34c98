//! Track probe
//!
//! Builds a small synthetic circuit, registers it with the collision world
//! and drives a few cars around it. Every tick the wheel rays, chassis boxes
//! and swept bumpers are probed and the results logged, which makes this a
//! handy way to eyeball partition tuning from a config file:
//!
//! ```text
//! cargo run -p track_probe -- track_probe/physics.toml
//! ```

use std::f32::consts::TAU;
use std::io;
use std::rc::Rc;

use race_physics::core::config::{Config, PhysicsConfig};
use race_physics::foundation::logging;
use race_physics::foundation::math::{Mat4, Point3, Quat, Vec3};
use race_physics::physics::{
    CollisionGroups, CollisionObject, CollisionObjectSettings, CollisionSettings, CollisionWorld, ObjectHandle,
    ObjectId, PhysicsError, SurfaceType, TrackSurface,
};
use race_physics::spatial::Frustum;

// Circuit layout
const TRACK_RADIUS: f32 = 60.0;
const TILE_COUNT: usize = 32;
const TILE_HALF_SIZE: f32 = 7.0;
const TILE_THICKNESS: f32 = 0.5;
const GRAVEL_EVERY: usize = 8;
const CONE_COUNT: usize = 12;

// Cars
const CAR_COUNT: u64 = 3;
const CHASSIS_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 0.9, 0.5);
const RIDE_HEIGHT: f32 = 0.8;
const WHEEL_RAY_LENGTH: f32 = 1.5;

// Simulation
const TICKS: usize = 40;
const DT: f32 = 0.1;

struct Car {
    id: ObjectId,
    chassis: ObjectHandle,
    angle: f32,
    speed: f32,
}

impl Car {
    fn position(&self) -> Vec3 {
        Vec3::new(
            TRACK_RADIUS * self.angle.cos(),
            TRACK_RADIUS * self.angle.sin(),
            RIDE_HEIGHT,
        )
    }

    /// Facing along the circuit tangent
    fn rotation(&self) -> Quat {
        Quat::from_axis_angle(&Vec3::z_axis(), self.angle + TAU / 4.0)
    }

    fn velocity(&self) -> Vec3 {
        self.rotation() * Vec3::new(self.speed, 0.0, 0.0)
    }

    fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt / TRACK_RADIUS) % TAU;
        self.chassis.set_pose(&self.position(), &self.rotation());
    }
}

pub struct TrackProbeApp {
    world: CollisionWorld,
    track: Vec<ObjectHandle>,
    cars: Vec<Car>,
}

impl TrackProbeApp {
    pub fn new(config: &PhysicsConfig) -> Result<Self, PhysicsError> {
        log::info!("Building probe circuit...");
        let mut world = CollisionWorld::new(config);

        let track = build_track()?;
        for piece in &track {
            world.add_physics_object(piece);
        }
        world.optimize_objects();
        log::info!(
            "Track registered: {} static objects, tree depth {}",
            world.static_object_count(),
            world.static_tree().root().depth()
        );

        let cars = spawn_cars()?;
        for car in &cars {
            world.add_physics_object(&car.chassis);
        }
        log::info!("{} cars on track", cars.len());

        Ok(Self { world, track, cars })
    }

    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        for tick in 0..TICKS {
            for car in &mut self.cars {
                car.advance(DT);
            }

            for car in &self.cars {
                self.probe_wheels(tick, car);
                self.probe_chassis(tick, car);
                self.probe_bumper(tick, car);
            }

            for (object, contacts) in self.world.collide_dynamic_objects() {
                let owner = object.settings().object_id();
                for contact in contacts {
                    log::info!(
                        "tick {}: car {:?} touching car {:?}, depth {:.3}",
                        tick,
                        owner,
                        contact.object().and_then(|other| other.settings().object_id()),
                        contact.depth()
                    );
                }
            }
        }

        self.report_visible_track();
        self.world.debug_print(false, &mut io::stdout().lock())?;
        Ok(())
    }

    fn probe_wheels(&self, tick: usize, car: &Car) {
        let settings = CollisionSettings::default();
        let down = -Vec3::z();
        let corners = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];

        for (index, (sx, sy)) in corners.iter().enumerate() {
            let offset = Vec3::new(sx * CHASSIS_HALF_EXTENTS.x, sy * CHASSIS_HALF_EXTENTS.y, -CHASSIS_HALF_EXTENTS.z);
            let origin = car.position() + car.rotation() * offset;

            match self.world.cast_ray(&origin, &down, WHEEL_RAY_LENGTH, &settings) {
                Some(contact) => log::debug!(
                    "tick {}: car {:?} wheel {} on {} at {:.3}",
                    tick,
                    car.id,
                    index,
                    contact.surface().surface_type,
                    contact.depth()
                ),
                None => log::warn!("tick {}: car {:?} wheel {} is airborne", tick, car.id, index),
            }
        }
    }

    fn probe_chassis(&self, tick: usize, car: &Car) {
        let settings = CollisionSettings::new()
            .with_dynamic_collide(true)
            .with_exception(car.id);
        let contacts = self
            .world
            .collide_box(&car.position(), &car.rotation(), &CHASSIS_HALF_EXTENTS, &settings);

        if let Some(deepest) = contacts.last() {
            log::info!(
                "tick {}: car {:?} chassis scraping {} object(s), deepest {:.3}",
                tick,
                car.id,
                contacts.len(),
                deepest.depth()
            );
        }
    }

    fn probe_bumper(&self, tick: usize, car: &Car) {
        let settings = CollisionSettings::new().with_exception(car.id);
        let contacts = self.world.collide_moving_box(
            &car.position(),
            &car.velocity(),
            &car.rotation(),
            &CHASSIS_HALF_EXTENTS,
            &settings,
            DT,
        );

        if let Some(first) = contacts.first() {
            log::info!(
                "tick {}: car {:?} will hit {} after {:.3}",
                tick,
                car.id,
                first.surface().surface_type,
                first.depth()
            );
        }
    }

    /// Track pieces seen by an overhead camera
    fn report_visible_track(&self) {
        let eye = Point3::new(0.0, -TRACK_RADIUS, 80.0);
        let view = Mat4::look_at_rh(&eye, &Point3::origin(), &Vec3::z());
        let projection = Mat4::new_perspective(16.0 / 9.0, TAU / 8.0, 0.5, 500.0);
        let frustum = Frustum::from_matrices(&projection, &view);

        let mut visible = Vec::new();
        self.world.static_tree().query(&frustum, &mut visible);
        log::info!("Overhead camera sees {} of {} track pieces", visible.len(), self.track.len());
    }
}

/// Closed slab mesh with its top face at z = 0
fn slab(center: Vec3, half_size: f32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let vertices = (0..8)
        .map(|i| {
            let x = if i & 1 == 0 { -half_size } else { half_size };
            let y = if i & 2 == 0 { -half_size } else { half_size };
            let z = if i & 4 == 0 { -TILE_THICKNESS } else { 0.0 };
            center + Vec3::new(x, y, z)
        })
        .collect();
    let faces = vec![
        [0, 2, 1], [1, 2, 3],
        [4, 5, 6], [5, 7, 6],
        [0, 1, 4], [1, 5, 4],
        [2, 6, 3], [3, 6, 7],
        [0, 4, 2], [2, 4, 6],
        [1, 3, 5], [3, 7, 5],
    ];
    (vertices, faces)
}

fn build_track() -> Result<Vec<ObjectHandle>, PhysicsError> {
    let asphalt = Rc::new(TrackSurface::new(SurfaceType::Asphalt).with_friction(1.0, 0.9));
    let gravel = Rc::new(
        TrackSurface::new(SurfaceType::Gravel)
            .with_friction(0.6, 0.5)
            .with_bumps(2.0, 0.05)
            .with_rolling(0.02, 0.5),
    );
    let concrete = Rc::new(TrackSurface::new(SurfaceType::Concrete).with_friction(0.8, 0.8));

    let mut pieces = Vec::with_capacity(TILE_COUNT + CONE_COUNT);

    for i in 0..TILE_COUNT {
        let angle = TAU * i as f32 / TILE_COUNT as f32;
        let center = Vec3::new(TRACK_RADIUS * angle.cos(), TRACK_RADIUS * angle.sin(), 0.0);
        let surface = if i % GRAVEL_EVERY == 0 { &gravel } else { &asphalt };

        let (vertices, faces) = slab(center, TILE_HALF_SIZE);
        let tile = CollisionObject::trimesh(&vertices, &faces, CollisionObjectSettings::new_static())?
            .with_surface(Rc::clone(surface));
        pieces.push(tile.into_handle());
    }

    // Cones on the inside of the circuit, close enough for an occasional scrape
    for i in 0..CONE_COUNT {
        let angle = TAU * (i as f32 + 0.5) / CONE_COUNT as f32;
        let radius = TRACK_RADIUS - 2.5;
        let cone = CollisionObject::cylinder_z(Vec3::new(0.3, 0.3, 0.5), CollisionObjectSettings::new_static())?
            .with_surface(Rc::clone(&concrete))
            .with_pose(Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.5), Quat::identity());
        pieces.push(cone.into_handle());
    }

    Ok(pieces)
}

fn spawn_cars() -> Result<Vec<Car>, PhysicsError> {
    (0..CAR_COUNT)
        .map(|i| {
            let id = ObjectId(i + 1);
            let settings = CollisionObjectSettings::new_dynamic()
                .with_object_id(id)
                .with_group(CollisionGroups::CHASSIS)
                .with_mask(CollisionGroups::CHASSIS | CollisionGroups::PROP);
            let chassis = CollisionObject::cuboid(CHASSIS_HALF_EXTENTS, settings)?.into_handle();

            let mut car = Car {
                id,
                chassis,
                angle: 0.15 * i as f32,
                speed: 30.0 - 4.0 * i as f32,
            };
            car.advance(0.0);
            Ok(car)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => PhysicsConfig::load_from_file(&path)?,
        None => PhysicsConfig::default(),
    };
    logging::init_with_filter(&config.log_level);

    println!("=== Track Probe ===");
    println!("Partition: {:?}", config.partition);
    println!();

    let app = TrackProbeApp::new(&config)?;
    app.run()
}
