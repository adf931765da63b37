mod common;

use common::{BusError, Chip};
use rcs730::registers::map;
use rcs730::{
    Device, Error, Interrupts, InvalidOperationMode, OperationMode, PlugSystemCode, SlaveAddress,
};

#[test]
fn operation_mode_is_written_once() {
    let mut chip = Chip::new();

    let mut device = Device::new(&mut chip);
    device.set_operation_mode(OperationMode::Plug).unwrap();
    device.set_operation_mode(OperationMode::Plug).unwrap();
    assert_eq!(device.operation_mode(), Ok(OperationMode::Plug));
    drop(device);

    assert_eq!(chip.register(map::reg::OPMODE), 1);
    assert_eq!(chip.writes_to(map::reg::OPMODE).len(), 1);
}

#[test]
fn raw_mode_values_are_validated_before_the_bus() {
    fn set_raw_mode(chip: &mut Chip, raw: u8) -> Result<(), Error<BusError>> {
        let mode = OperationMode::try_from(raw)?;
        let mut device = Device::new(chip);
        device.set_operation_mode(mode)
    }

    let mut chip = Chip::new();
    assert_eq!(set_raw_mode(&mut chip, 4), Err(Error::InvalidMode(4)));
    assert_eq!(chip.attempts(), 0);
    assert_eq!(OperationMode::try_from(5), Err(InvalidOperationMode(5)));
}

#[test]
fn felica_through_rejects_other_modes() {
    let mut chip = Chip::new();

    let mut device = Device::new(&mut chip);
    assert_eq!(
        device.init_felica_through(OperationMode::NfcDep),
        Err(Error::UnsupportedMode(OperationMode::NfcDep))
    );
    assert_eq!(
        device.init_felica_through(OperationMode::LiteS),
        Err(Error::UnsupportedMode(OperationMode::LiteS))
    );
    drop(device);

    assert_eq!(chip.attempts(), 0);
}

#[test]
fn felica_through_sets_mode_and_unmasks_host_through_irq() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::OPMODE, 3);
    chip.set_register(map::reg::INT_MASK, Interrupts::all().bits());

    let mut device = Device::new(&mut chip);
    device
        .init_felica_through(OperationMode::LiteSHostThrough)
        .unwrap();
    drop(device);

    assert_eq!(chip.register(map::reg::OPMODE), 0);
    assert_eq!(
        chip.register(map::reg::INT_MASK),
        (Interrupts::all() - Interrupts::TAG_RW_RX_DONE2).bits()
    );
}

#[test]
fn felica_through_stops_when_mode_write_fails() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::INT_MASK, Interrupts::all().bits());
    chip.fail_when(|record| record.target() == Some(map::reg::OPMODE) && record.bytes.len() > 2);

    let mut device = Device::new(&mut chip);
    assert!(device.init_felica_through(OperationMode::Plug).is_err());
    drop(device);

    assert_eq!(chip.attempted_writes_to(map::reg::INT_MASK), 0);
}

#[test]
fn interrupt_mask_touches_only_selected_bits() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::INT_MASK, 0x0000_00F0);

    let mut device = Device::new(&mut chip);
    device
        .set_interrupt_mask(
            Interrupts::TAG_RX_DONE | Interrupts::TAG_TX_DONE,
            Interrupts::TAG_RX_DONE | Interrupts::TAG_PL_RX_DONE,
        )
        .unwrap();
    assert_eq!(device.interrupt_mask(), Ok(Interrupts::from_bits_retain(0x0000_00B1)));
}

#[test]
fn slave_address_follows_successful_update() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::I2C_SLAVE_ADDR, 0x40);

    let mut device = Device::new(&mut chip);
    device.set_slave_address(0x24).unwrap();
    assert_eq!(device.slave_address(), SlaveAddress::new(0x24).unwrap());
    assert_eq!(device.stored_slave_address(), Ok(0x24));
    drop(device);

    // The read-back went to the new address
    assert_eq!(chip.log.last().map(|r| r.address), Some(0x49));
}

#[test]
fn slave_address_kept_on_failure() {
    let mut chip = Chip::new();
    chip.fail_when(|record| record.target() == Some(map::reg::I2C_SLAVE_ADDR) && record.bytes.len() > 2);

    let mut device = Device::new(&mut chip);
    assert_eq!(device.set_slave_address(0x24), Err(Error::Bus(BusError)));
    assert_eq!(device.slave_address(), SlaveAddress::default());
}

#[test]
fn slave_address_must_fit_seven_bits() {
    let mut chip = Chip::new();

    let mut device = Device::new(&mut chip);
    assert_eq!(device.set_slave_address(0x80), Err(Error::InvalidAddress(0x80)));
    drop(device);

    assert_eq!(chip.attempts(), 0);
}

#[test]
fn plug_system_code_is_one_bit() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::PLUG_CONF1, 0x0000_0101);

    let mut device = Device::new(&mut chip);
    device.set_plug_system_code(PlugSystemCode::Ndef).unwrap();
    drop(device);
    assert_eq!(chip.register(map::reg::PLUG_CONF1), 0x0000_0103);

    let mut device = Device::new(&mut chip);
    device.set_plug_system_code(PlugSystemCode::Feel).unwrap();
    drop(device);
    assert_eq!(chip.register(map::reg::PLUG_CONF1), 0x0000_0101);
}

#[test]
fn initialize_is_forced_without_readback() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::INIT_CTRL, 0x4A);

    let mut device = Device::new(&mut chip);
    device.enter_initialize_state().unwrap();
    drop(device);

    assert_eq!(chip.attempts(), 1);
    assert_eq!(chip.writes()[0].payload(), &[0x4A, 0x00, 0x00, 0x00]);
}

#[test]
fn status_helpers() {
    let mut chip = Chip::new();
    chip.set_register(map::reg::INT_STATUS, 0x0000_0008);
    chip.set_register(map::reg::INT_RAW_STATUS, 0x0000_0048);
    chip.set_register(map::reg::RF_STATUS, 0x0000_0003);

    let mut device = Device::new(&mut chip);
    assert_eq!(device.interrupt_status(), Ok(Interrupts::TAG_RW_RX_DONE2));
    assert_eq!(
        device.raw_interrupt_status(),
        Ok(Interrupts::TAG_RW_RX_DONE2 | Interrupts::TAG_TX_DONE)
    );
    assert_eq!(device.rf_status(), Ok(3));
}
