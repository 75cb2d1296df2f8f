use ordered_float::OrderedFloat;

use super::{KernelParams, WorkItem};
use crate::geometry::{IntersectionData, Primitive, Sphere};
use crate::math::{reflect, refract, RGBColor, Ray, Vec3};
use crate::protocol::{SceneBuffer, SphereRecord};

fn primitive(record: &SphereRecord) -> Sphere {
    Sphere::new(record.radius, record.center)
}

pub fn primary_ray(scene: &SceneBuffer, item: WorkItem, params: &KernelParams) -> Ray {
    let (width, height) = (scene.width() as f32, scene.height() as f32);
    let direction = Vec3::new(
        (item.column as f32 - 0.5 * width) * params.scale,
        (item.row as f32 - 0.5 * height) * params.scale,
        params.focal_z,
    );
    Ray::new(scene.camera(), direction.normalized())
}

// nearest hit over every sphere. on an exact tie the sphere scanned first wins.
pub fn intersect(scene: &SceneBuffer, ray: Ray) -> Option<IntersectionData> {
    scene
        .spheres()
        .enumerate()
        .filter_map(|(index, record)| primitive(&record).intersect(ray, index))
        .min_by_key(|hit| OrderedFloat(hit.time))
}

pub fn intersect_anything(scene: &SceneBuffer, ray: Ray) -> bool {
    scene
        .spheres()
        .any(|record| primitive(&record).intersect_time(ray).is_some())
}

pub fn trace(scene: &SceneBuffer, ray: Ray, depth: u32, params: &KernelParams) -> RGBColor {
    match intersect(scene, ray) {
        Some(hit) => shade(scene, ray, &hit, depth, params),
        None => params.background(),
    }
}

// local shading at `hit`: ambient floor, then diffuse and specular when the light is visible.
pub fn shade(
    scene: &SceneBuffer,
    ray: Ray,
    hit: &IntersectionData,
    depth: u32,
    params: &KernelParams,
) -> RGBColor {
    let material = scene.sphere(hit.primitive);
    let dir_to_camera = -ray.direction;
    let mut color = RGBColor::splat(params.min_light);

    if params.secondary_rays && depth > 0 {
        let reflectivity = material.albedo.z();
        if reflectivity > 0.0 {
            let direction = reflect(dir_to_camera, hit.normal);
            let bounced = Ray::offset(hit.point, direction, params.reflection_bias);
            color += trace(scene, bounced, depth - 1, params) * reflectivity;
        }
        let [weight, index] = material.refract;
        if weight > 0.0 && index > 0.0 {
            if let Some(direction) = refract(ray.direction, hit.normal, index) {
                let direction = direction.normalized();
                let through = Ray::offset(hit.point, direction, params.refraction_bias);
                color += trace(scene, through, depth - 1, params) * weight;
            }
        }
    }

    let light = match scene.light() {
        Some(light) => light,
        None => return color,
    };
    let dir_to_light = (light - hit.point).normalized();

    // hard shadow, anything in the way blocks the light entirely
    if intersect_anything(
        scene,
        Ray::offset(hit.point, dir_to_light, params.shadow_bias),
    ) {
        return color;
    }

    let dp = dir_to_light * hit.normal;
    if dp > 0.0 {
        color += material.color * (dp * params.light_power * material.diffuse);
    }

    // specular is not tinted by the material color
    let dp = reflect(dir_to_light, hit.normal) * dir_to_camera;
    if dp > 0.0 {
        let specular = dp.powf(material.albedo.x()) * params.light_power * material.albedo.y();
        color += RGBColor::splat(specular);
    }
    color
}
