use component_macros::Injectable;
use di_impl::{args, ArgumentResult, Arguments, Inject, Lifetime, ServiceContainer};

#[derive(Injectable)]
#[injectable(constructor = "Engine::from_args")]
struct Engine {
    power: u32,
}

impl Engine {
    fn from_args(args: &Arguments) -> ArgumentResult<Self> {
        args.expect_arity(1)?;
        Ok(Self {
            power: args.get::<u32>(0)?,
        })
    }
}

#[derive(Injectable)]
#[dependency(scoped)]
struct Car {
    #[inject]
    engine: Inject<Engine>,
    mileage: u64,
}

#[derive(Injectable)]
struct Garage(#[inject] Inject<Car>, Vec<String>);

fn main() {
    let container = ServiceContainer::new();
    container
        .register_with_args::<Engine>(Lifetime::Singleton, args![300_u32])
        .register::<Garage>(Lifetime::Transient);
    di_impl::auto_register!(container);

    let garage = container.resolve_required::<Garage>().unwrap();
    assert_eq!(garage.0.engine.power, 300);
    assert_eq!(garage.0.mileage, 0);
    assert!(garage.1.is_empty());
}
