use opencl::wrapper::platform::Platform;

fn main() {
    let platform = Platform::first().unwrap();
    println!("{:#?}", platform.info);

    let devices = platform.get_accelerator_devices().unwrap();

    for device in devices.iter() {
        println!("{:?}", device.info().unwrap());
    }
}
